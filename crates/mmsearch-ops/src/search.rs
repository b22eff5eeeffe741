use std::cell::{Ref, RefCell};
use std::rc::Rc;

use mmsearch_client::VisionClient;
use mmsearch_core::state::{Operation, OperationState};
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{ResultItem, SearchForm, SearchRequest};

use crate::dispatch::{drive, view};

/// Text, image and multimodal search share one operation: a new submit in any
/// mode supersedes whatever search is still in flight.
pub struct SearchPanel<T> {
    client: Rc<VisionClient<T>>,
    results: RefCell<Operation<Vec<ResultItem>>>,
}

impl<T: Transport> SearchPanel<T> {
    pub fn new(client: Rc<VisionClient<T>>) -> Self {
        Self { client, results: RefCell::new(Operation::new("search")) }
    }

    /// Returns whether this submit's outcome was applied (false if superseded).
    pub async fn submit(&self, form: SearchForm) -> bool {
        drive(&self.results, async {
            let req = SearchRequest::from_form(form)?;
            self.client.search(&req).await
        })
        .await
    }

    pub fn state(&self) -> Ref<'_, OperationState<Vec<ResultItem>>> { view(&self.results) }
}
