use std::cell::{Ref, RefCell};
use std::future::Future;

use mmsearch_core::error::Result;
use mmsearch_core::state::{Operation, OperationState};

/// Dispatch `op`, await `work`, then settle under the token taken at dispatch.
///
/// `work` must be lazy (an `async` block) so validation inside it runs after
/// the dispatch and its failure lands in `Failed` like any other error. The
/// `RefCell` borrow is never held across the await.
pub(crate) async fn drive<T, F>(op: &RefCell<Operation<T>>, work: F) -> bool
where
    F: Future<Output = Result<T>>,
{
    let token = op.borrow_mut().dispatch();
    let outcome = work.await;
    op.borrow_mut().settle(token, outcome)
}

pub(crate) fn view<T>(op: &RefCell<Operation<T>>) -> Ref<'_, OperationState<T>> {
    Ref::map(op.borrow(), Operation::state)
}
