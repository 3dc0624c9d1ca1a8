use pretty_assertions::assert_eq;
use quire_client::{Dirty, InfoStyle, MenuStyle, OptionValue, UiOptions};
use quire_primitives::{BufferCoord, DisplayCoord, DisplayLine, Face};

use crate::common::{Harness, UiCall};

#[test]
fn first_redraw_flushes_everything_once() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);

	h.redraw(&client);

	let refreshes = client.ui.refreshes();
	assert_eq!(refreshes.len(), 1);
	assert_eq!(
		refreshes[0],
		Dirty::REFRESH | Dirty::DRAW | Dirty::STATUS_LINE | Dirty::MENU_HIDE | Dirty::INFO_HIDE
	);
	let calls = client.ui.calls();
	assert!(calls.contains(&UiCall::MenuHide));
	assert!(calls.contains(&UiCall::InfoHide));
	assert_eq!(calls.last(), Some(&UiCall::Refresh(refreshes[0])));
}

#[test]
fn redraw_without_changes_is_silent() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	h.redraw(&client);
	h.redraw(&client);

	assert!(client.ui.calls().is_empty());
}

#[test]
fn document_edit_triggers_a_content_redraw() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	client.ui.send_keys("e");
	h.process(&client);
	h.redraw(&client);

	let calls = client.ui.calls();
	assert!(calls.contains(&UiCall::Draw(
		["ehello", ""].into_iter().chain(std::iter::repeat_n("~", 8)).map(String::from).collect()
	)));
	let refreshes = client.ui.refreshes();
	assert_eq!(refreshes.len(), 1);
	assert!(refreshes[0].contains(Dirty::REFRESH | Dirty::DRAW | Dirty::STATUS_LINE));
}

#[test]
fn show_then_hide_before_a_flush_only_hides() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	let session = h.manager.session_mut(client.id).unwrap();
	session.menu_show(vec![DisplayLine::styled("one", Face::Default)], BufferCoord::default(), MenuStyle::Prompt);
	session.menu_select(Some(0));
	session.menu_hide();
	session.info_show("t", "body", BufferCoord::default(), InfoStyle::Prompt);
	session.info_hide(false);
	h.redraw(&client);

	let calls = client.ui.calls();
	assert!(calls.contains(&UiCall::MenuHide));
	assert!(calls.contains(&UiCall::InfoHide));
	assert!(!calls.iter().any(|call| matches!(call, UiCall::MenuShow { .. } | UiCall::MenuSelect(_))));
	assert!(!calls.iter().any(|call| matches!(call, UiCall::InfoShow { .. })));
}

#[test]
fn menu_is_shown_then_selected_in_one_flush() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	let session = h.manager.session_mut(client.id).unwrap();
	let items = vec![DisplayLine::styled("one", Face::Default), DisplayLine::styled("two", Face::Default)];
	session.menu_show(items, BufferCoord::new(0, 2), MenuStyle::Inline);
	session.menu_select(Some(1));
	h.redraw(&client);

	let calls = client.ui.calls();
	let show = calls.iter().position(|call| {
		*call
			== UiCall::MenuShow {
				items: vec!["one".into(), "two".into()],
				anchor: DisplayCoord::new(0, 2),
				style: MenuStyle::Inline,
			}
	});
	let select = calls.iter().position(|call| *call == UiCall::MenuSelect(Some(1)));
	assert!(show.is_some() && select.is_some());
	assert!(show < select);
	assert_eq!(client.ui.refreshes(), vec![Dirty::REFRESH | Dirty::MENU_SHOW | Dirty::MENU_SELECT]);
}

#[test]
fn modal_info_ignores_other_requests_until_forced_away() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	let session = h.manager.session_mut(client.id).unwrap();
	session.info_show("modal", "answer me", BufferCoord::default(), InfoStyle::Modal);
	session.info_show("other", "ignored", BufferCoord::default(), InfoStyle::Prompt);
	session.info_hide(false);
	assert_eq!(session.info().title, "modal");
	assert!(session.pending_dirty().contains(Dirty::INFO_SHOW));
	assert!(!session.pending_dirty().contains(Dirty::INFO_HIDE));

	h.redraw(&client);
	assert!(client.ui.calls().contains(&UiCall::InfoShow {
		title: "modal".into(),
		content: "answer me".into(),
		anchor: DisplayCoord::default(),
		style: InfoStyle::Modal,
	}));
	client.ui.take();

	let session = h.manager.session_mut(client.id).unwrap();
	session.info_hide(true);
	assert!(!session.info().is_visible());
	h.redraw(&client);
	assert!(client.ui.calls().contains(&UiCall::InfoHide));
}

#[test]
fn inline_menu_follows_its_anchor_when_the_view_scrolls() {
	let mut h = Harness::new();
	let text: String = (0..30).map(|n| format!("line {n}\n")).collect();
	let doc = h.scratch("long", &text);
	let client = h.spawn("main", doc);

	let session = h.manager.session_mut(client.id).unwrap();
	session.menu_show(vec![DisplayLine::styled("item", Face::Default)], BufferCoord::new(12, 0), MenuStyle::Inline);
	h.settle(&client);

	// Move the cursor to line 12: the window scrolls by three lines.
	client.ui.send_keys("jjjjjjjjjjjj");
	h.process(&client);
	h.redraw(&client);

	assert!(client.ui.calls().contains(&UiCall::MenuShow {
		items: vec!["item".into()],
		anchor: DisplayCoord::new(9, 0),
		style: MenuStyle::Inline,
	}));
	assert!(client.ui.refreshes()[0].contains(Dirty::MENU_SHOW | Dirty::MENU_SELECT));
}

#[test]
fn broken_modelinefmt_falls_back_and_still_refreshes() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	h.manager
		.set_option(client.id, OptionValue::ModelineFmt("%val{nope}".into()))
		.unwrap();
	h.redraw(&client);

	let (_, mode, face) = client.ui.last_status().expect("status drawn");
	assert_eq!(mode, DisplayLine::styled("modelinefmt error, see *debug* buffer", Face::Error));
	assert_eq!(face, Face::StatusLine);
	assert_eq!(client.ui.refreshes().len(), 1);
	assert!(h.manager.debug_log().contains("Error while parsing modelinefmt"));
}

#[test]
fn mode_line_combines_values_and_atoms() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.manager
		.set_option(
			client.id,
			OptionValue::ModelineFmt("%val{bufname} %val{cursor_line}:%val{cursor_char_column} {{context_info}} {{mode_info}} %val{client}@[%val{session}]".into()),
		)
		.unwrap();
	client.interpreter.set_mode("insert");
	client.interpreter.set_recording(Some('q'));

	client.ui.send_keys("el");
	h.process(&client);
	h.manager.session_mut(client.id).unwrap().set_hooks_disabled(true);
	h.redraw(&client);

	let mode_line = h.manager.session(client.id).unwrap().mode_line().text();
	assert_eq!(mode_line, "notes 1:2 [+][recording (q)][no-hooks] insert main@[srv]");
}

#[test]
fn immediate_status_draws_without_waiting() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	let session = h.manager.session_mut(client.id).unwrap();
	session.print_status(DisplayLine::styled("working", Face::Information), true);

	let (status, _, _) = client.ui.last_status().expect("status drawn");
	assert_eq!(status, "working");
	assert_eq!(client.ui.refreshes(), vec![Dirty::REFRESH | Dirty::STATUS_LINE]);
	assert!(h.manager.session(client.id).unwrap().pending_dirty().is_empty());
}

#[test]
fn ui_options_reach_the_surface_and_redraw() {
	let mut h = Harness::new();
	let doc = h.scratch("notes", "hello\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	let options = UiOptions::from([("assistant".to_string(), "none".to_string())]);
	h.manager
		.set_option(client.id, OptionValue::UiOptions(options.clone()))
		.unwrap();

	assert_eq!(client.ui.calls(), vec![UiCall::SetUiOptions(options)]);
	h.redraw(&client);
	assert!(client.ui.refreshes()[0].contains(Dirty::DRAW));
}
