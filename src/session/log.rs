use super::{Message, MessageId, MessageKind, Sender};

/// Append-only transcript. Ids are assigned here and grow with every append.
#[derive(Debug, Default, Clone)]
pub struct ConversationLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ConversationLog {
    pub fn append(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        kind: MessageKind,
    ) -> &Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text: text.into(),
            sender,
            kind,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
