use mmsearch_core::error::{Error, TransportError};
use mmsearch_core::state::{Operation, OperationState};

#[test]
fn starts_idle_and_dispatch_goes_pending() {
    let mut op: Operation<Vec<u32>> = Operation::new("search");
    assert_eq!(op.state(), &OperationState::Idle);
    let token = op.dispatch();
    assert_eq!(op.state(), &OperationState::Pending(token));
    assert!(op.state().is_pending());
}

#[test]
fn older_response_arriving_last_is_discarded() {
    let mut op = Operation::new("search");
    let first = op.dispatch();
    let second = op.dispatch();
    assert!(op.resolve(second, "second"));
    assert!(!op.resolve(first, "first"), "stale token must be a no-op");
    assert_eq!(op.state(), &OperationState::Succeeded("second"));
}

#[test]
fn stale_rejection_does_not_clobber_pending() {
    let mut op: Operation<&str> = Operation::new("ask");
    let first = op.dispatch();
    let second = op.dispatch();
    assert!(!op.reject(first, "Request failed: 500"));
    assert_eq!(op.state(), &OperationState::Pending(second));
}

#[test]
fn failed_and_succeeded_are_not_terminal() {
    let mut op = Operation::new("build");
    let t1 = op.dispatch();
    op.settle(t1, Err::<u8, _>(Error::Transport(TransportError::Http { status: 503, detail: None })));
    assert_eq!(op.state().error(), Some("Request failed: 503"));

    let t2 = op.dispatch();
    assert!(op.state().error().is_none(), "next dispatch clears the last error");
    op.settle(t2, Ok(1));
    assert_eq!(op.state().value(), Some(&1));

    let t3 = op.dispatch();
    assert!(op.state().value().is_none());
    assert!(op.reject(t3, "boom"));
}
