use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quire_client::{DebugFlags, Dirty, Hook, OptionValue};
use quire_primitives::{DisplayCoord, Face, Key};

use crate::common::{Harness, UiCall};

#[test]
fn empty_queue_processes_nothing() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);

	assert!(!h.process(&client));
	assert!(h.hooks.params(Hook::RawKey).is_empty());
}

#[test]
fn failing_key_is_reported_and_the_batch_continues() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);

	client.ui.send_keys("a!b");
	assert!(h.process(&client));

	assert_eq!(client.interpreter.handled_text(), "ab");
	assert_eq!(h.hooks.params(Hook::RuntimeError), vec!["no such command: '!'"]);
	assert_eq!(h.hooks.params(Hook::RawKey), vec!["a", "b"]);

	let session = h.manager.session(client.id).unwrap();
	assert_eq!(session.status_line().text(), "no such command: '!'");
	assert_eq!(session.status_line().atoms()[0].face, Face::Error);
	assert!(session.pending_dirty().contains(Dirty::STATUS_LINE));
}

#[test]
fn events_queued_during_a_pass_wait_for_the_next_one() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);
	client.interpreter.echo_into(client.ui.sender());

	client.ui.send_keys("r");
	assert!(h.process(&client));
	assert_eq!(client.interpreter.handled_text(), "r");

	assert!(h.process(&client));
	assert_eq!(client.interpreter.handled_text(), "rz");
	assert!(!h.process(&client));
}

#[test]
fn focus_events_run_hooks_with_the_session_name() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);

	let sender = client.ui.sender();
	sender.send(quire_client::InputEvent::FocusIn);
	sender.send(quire_client::InputEvent::FocusOut);
	h.process(&client);

	assert_eq!(h.hooks.params(Hook::FocusIn), vec!["main"]);
	assert_eq!(h.hooks.params(Hook::FocusOut), vec!["main"]);
	assert_eq!(h.hooks.params(Hook::RawKey), vec!["<focus_in>", "<focus_out>"]);
	assert!(client.interpreter.handled().is_empty());
}

#[test]
fn resize_resyncs_the_view_and_forces_a_redraw() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);
	h.settle(&client);

	client.ui.set_dimensions(DisplayCoord::new(3, 12));
	client.ui.sender().send(quire_client::InputEvent::Resize);
	h.process(&client);

	let session = h.manager.session(client.id).unwrap();
	assert_eq!(session.view().dimensions(), DisplayCoord::new(3, 12));

	h.redraw(&client);
	let refreshes = client.ui.refreshes();
	assert_eq!(refreshes.len(), 1);
	assert!(refreshes[0].contains(Dirty::DRAW | Dirty::STATUS_LINE | Dirty::MENU_HIDE | Dirty::INFO_HIDE));
	assert!(client.ui.calls().contains(&UiCall::Draw(vec!["text".into(), "".into(), "~".into()])));
}

#[test]
fn ctrl_c_raises_the_interrupt_instead_of_queueing() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);

	assert!(client.ui.sender().send(Key::ctrl('c')));
	assert!(!h.process(&client));

	let session = h.manager.session(client.id).unwrap();
	assert!(session.take_interrupt());
	assert!(!session.take_interrupt());
}

#[test]
fn keys_debug_flag_traces_every_event() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);
	h.manager
		.set_option(client.id, OptionValue::Debug(DebugFlags::KEYS))
		.unwrap();

	client.ui.send_keys("x");
	client.ui.sender().send(Key::new(quire_primitives::KeyCode::Enter));
	h.process(&client);

	let lines = h.manager.debug_log().lines();
	assert_eq!(lines, ["Client 'main' got key 'x'", "Client 'main' got key '<ret>'"]);
}

#[test]
fn disabled_hooks_are_skipped() {
	let mut h = Harness::new();
	let doc = h.scratch("a", "text\n");
	let client = h.spawn("main", doc);
	h.manager.session_mut(client.id).unwrap().set_hooks_disabled(true);

	client.ui.send_keys("ab");
	h.process(&client);

	assert_eq!(client.interpreter.handled_text(), "ab");
	assert!(h.hooks.params(Hook::RawKey).is_empty());
}

proptest! {
	#[test]
	fn one_failing_event_never_blocks_the_rest(keys in "[a-d!]{1,24}") {
		let mut h = Harness::new();
		let doc = h.scratch("a", "text\n");
		let client = h.spawn("main", doc);

		client.ui.send_keys(&keys);
		prop_assert!(h.process(&client));

		let expected: String = keys.chars().filter(|&c| c != '!').collect();
		let failures = keys.chars().filter(|&c| c == '!').count();
		prop_assert_eq!(client.interpreter.handled_text(), expected.clone());
		prop_assert_eq!(h.hooks.params(Hook::RuntimeError).len(), failures);
		prop_assert_eq!(h.hooks.params(Hook::RawKey).concat(), expected);
	}
}
