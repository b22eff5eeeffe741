use std::cell::{Ref, RefCell};
use std::rc::Rc;

use mmsearch_client::VisionClient;
use mmsearch_core::state::{Operation, OperationState};
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{AnswerText, BinaryPayload};

use crate::dispatch::{drive, view};

pub struct VqaPanel<T> {
    client: Rc<VisionClient<T>>,
    question: RefCell<Operation<AnswerText>>,
    description: RefCell<Operation<AnswerText>>,
}

impl<T: Transport> VqaPanel<T> {
    pub fn new(client: Rc<VisionClient<T>>) -> Self {
        Self {
            client,
            question: RefCell::new(Operation::new("vqa.question")),
            description: RefCell::new(Operation::new("vqa.describe")),
        }
    }

    pub async fn ask(&self, image: Option<&BinaryPayload>, question: &str) -> bool {
        drive(&self.question, self.client.ask(image, question)).await
    }

    pub async fn describe(&self, image: Option<&BinaryPayload>) -> bool {
        drive(&self.description, self.client.describe(image)).await
    }

    pub fn answer(&self) -> Ref<'_, OperationState<AnswerText>> { view(&self.question) }

    pub fn description(&self) -> Ref<'_, OperationState<AnswerText>> { view(&self.description) }
}
