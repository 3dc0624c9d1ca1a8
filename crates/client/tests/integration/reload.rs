use std::path::Path;
use std::time::{Duration, SystemTime};

use pretty_assertions::assert_eq;
use quire_client::{Autoreload, DocumentId, InfoStyle, KeyRoute, NextKeyHandler, OptionValue, ReloadCheck};
use quire_primitives::{Face, Key, KeyCode};
use tempfile::TempDir;

use crate::common::{Client, Harness, UiCall};

/// Rewrites `path` and pushes its modification time forward so the change
/// is visible regardless of timestamp granularity.
fn modify_externally(path: &Path, content: &str) {
	std::fs::write(path, content).unwrap();
	let file = std::fs::File::options().write(true).open(path).unwrap();
	file.set_modified(SystemTime::now() + Duration::from_secs(60)).unwrap();
}

fn open_file(h: &mut Harness, dir: &TempDir, content: &str) -> (DocumentId, std::path::PathBuf) {
	let path = dir.path().join("notes.txt");
	std::fs::write(&path, content).unwrap();
	let doc = h.manager.documents_mut().open_file(&path).unwrap();
	(doc, path)
}

fn text(h: &Harness, doc: DocumentId) -> String {
	h.manager.documents().get(doc).unwrap().text().to_string()
}

fn status(h: &Harness, client: &Client) -> (String, Face) {
	let line = h.manager.session(client.id).unwrap().status_line().clone();
	(line.text(), line.atoms().first().map(|atom| atom.face).unwrap_or_default())
}

#[test]
fn unchanged_file_needs_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, _) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);

	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Unchanged);
}

#[test]
fn scratch_documents_are_never_checked() {
	let mut h = Harness::new();
	let doc = h.scratch("scratch", "x\n");
	let client = h.spawn("main", doc);

	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Unchanged);
}

#[test]
fn missing_file_counts_as_unchanged() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);

	std::fs::remove_file(&path).unwrap();
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Unchanged);
}

#[test]
fn autoreload_no_ignores_changes() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);
	h.manager
		.set_option(client.id, OptionValue::Autoreload(Autoreload::No))
		.unwrap();

	modify_externally(&path, "new\n");
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Unchanged);
	assert_eq!(text(&h, doc), "old\n");
}

#[test]
fn autoreload_yes_reloads_without_asking() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);
	h.manager
		.set_option(client.id, OptionValue::Autoreload(Autoreload::Yes))
		.unwrap();

	modify_externally(&path, "new\n");
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Reloaded);
	assert_eq!(text(&h, doc), "new\n");
	assert_eq!(status(&h, &client), ("'notes.txt' reloaded".to_string(), Face::Information));
	assert!(!h.manager.session(client.id).unwrap().is_reload_dialog_open());
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Unchanged);
}

#[test]
fn ask_prompt_is_modal_and_routes_the_next_key() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	modify_externally(&path, "new\n");
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Prompted);
	assert_eq!(h.manager.check_reload(client.id).unwrap(), ReloadCheck::Pending);

	let session = h.manager.session(client.id).unwrap();
	assert!(session.is_reload_dialog_open());
	assert_eq!(session.key_route(), KeyRoute::NextKey(NextKeyHandler::ReloadPrompt));

	h.redraw(&client);
	assert!(client.ui.calls().contains(&UiCall::InfoShow {
		title: "reload 'notes.txt' ?".into(),
		content: "'notes.txt' was modified externally\npress <ret> or y to reload, <esc> or n to keep".into(),
		anchor: Default::default(),
		style: InfoStyle::Modal,
	}));
}

#[test]
fn answering_yes_reloads_and_closes_every_prompt_on_the_document() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let first = h.spawn("first", doc);
	let second = h.spawn("second", doc);

	modify_externally(&path, "new\n");
	assert_eq!(h.manager.check_reload(first.id).unwrap(), ReloadCheck::Prompted);
	assert_eq!(h.manager.check_reload(second.id).unwrap(), ReloadCheck::Prompted);

	first.ui.send_keys("y");
	h.process(&first);

	assert_eq!(text(&h, doc), "new\n");
	assert_eq!(status(&h, &first), ("'notes.txt' reloaded".to_string(), Face::Information));
	for client in [&first, &second] {
		let session = h.manager.session(client.id).unwrap();
		assert!(!session.is_reload_dialog_open());
		assert!(!session.info().is_visible());
		assert_eq!(session.key_route(), KeyRoute::Normal);
		assert_eq!(client.interpreter.resets(), 1);
		assert!(client.interpreter.handled().is_empty());
	}

	assert_eq!(h.manager.check_reload(first.id).unwrap(), ReloadCheck::Unchanged);
	assert_eq!(h.manager.check_reload(second.id).unwrap(), ReloadCheck::Unchanged);

	h.redraw(&second);
	assert!(second.ui.calls().contains(&UiCall::InfoHide));
}

#[test]
fn answering_no_keeps_the_content_and_restamps() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let first = h.spawn("first", doc);
	let second = h.spawn("second", doc);

	modify_externally(&path, "new\n");
	h.manager.check_reload(first.id).unwrap();
	h.manager.check_reload(second.id).unwrap();

	second.ui.sender().send(Key::new(KeyCode::Esc));
	h.process(&second);

	assert_eq!(text(&h, doc), "old\n");
	assert_eq!(status(&h, &second), ("'notes.txt' kept".to_string(), Face::Information));
	assert!(!h.manager.session(first.id).unwrap().is_reload_dialog_open());
	assert!(!h.manager.session(second.id).unwrap().is_reload_dialog_open());
	assert_eq!(h.manager.check_reload(first.id).unwrap(), ReloadCheck::Unchanged);
}

#[test]
fn invalid_answer_reprompts() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);

	modify_externally(&path, "new\n");
	h.manager.check_reload(client.id).unwrap();

	client.ui.send_keys("q");
	h.process(&client);

	assert_eq!(status(&h, &client), ("'q' is not a valid choice".to_string(), Face::Error));
	let session = h.manager.session(client.id).unwrap();
	assert!(session.is_reload_dialog_open());
	assert_eq!(session.key_route(), KeyRoute::NextKey(NextKeyHandler::ReloadPrompt));
	assert!(client.interpreter.handled().is_empty());

	client.ui.sender().send(Key::new(KeyCode::Enter));
	client.ui.send_keys("x");
	h.process(&client);

	assert_eq!(text(&h, doc), "new\n");
	assert_eq!(client.interpreter.handled_text(), "x");
}

#[test]
fn switching_documents_closes_the_prompt() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let other = h.scratch("other", "");
	let client = h.spawn("main", doc);

	modify_externally(&path, "new\n");
	h.manager.check_reload(client.id).unwrap();
	h.manager.change_buffer(client.id, other).unwrap();

	let session = h.manager.session(client.id).unwrap();
	assert!(!session.is_reload_dialog_open());
	assert_eq!(session.key_route(), KeyRoute::Normal);
	assert_eq!(client.interpreter.resets(), 1);
	assert_eq!(text(&h, doc), "old\n");
}

#[test]
fn run_once_prompts_after_processing_input() {
	let dir = tempfile::tempdir().unwrap();
	let mut h = Harness::new();
	let (doc, path) = open_file(&mut h, &dir, "old\n");
	let client = h.spawn("main", doc);

	modify_externally(&path, "new\n");
	client.ui.send_keys("a");
	assert!(h.manager.run_once());

	assert_eq!(client.interpreter.handled_text(), "a");
	assert!(h.manager.session(client.id).unwrap().is_reload_dialog_open());
	assert!(client.ui.calls().iter().any(|call| matches!(call, UiCall::InfoShow { style: InfoStyle::Modal, .. })));

	client.ui.send_keys("y");
	assert!(h.manager.run_once());
	assert_eq!(text(&h, doc), "new\n");
	assert!(client.ui.calls().last().is_some_and(|call| matches!(call, UiCall::Refresh(_))));
}
