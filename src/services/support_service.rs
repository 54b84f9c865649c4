use chrono::{DateTime, Utc};

use crate::models::{MessageSender, SupportMessage};

pub const SUPPORT_GREETING: &str = "Olá! Como posso ajudar você hoje?";

/// Produces the support side of a chat thread.
///
/// The scripted implementation stands in until support replies come from a
/// real help-desk backend.
pub trait SupportResponder: Send + Sync {
    /// `turn` is the number of user messages already in the thread.
    fn reply(&self, message: &str, turn: usize) -> String;
}

#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    replies: Vec<String>,
}

impl ScriptedResponder {
    pub fn new(replies: Vec<String>) -> Self {
        Self { replies }
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new(vec![
            "Entendi. Vamos verificar isso para você.".to_string(),
            "Obrigado por entrar em contato. Um atendente irá analisar sua solicitação."
                .to_string(),
            "Certo, já registramos seu pedido. Em breve entraremos em contato.".to_string(),
            "Poderia fornecer mais detalhes sobre essa questão?".to_string(),
        ])
    }
}

impl SupportResponder for ScriptedResponder {
    fn reply(&self, _message: &str, turn: usize) -> String {
        if self.replies.is_empty() {
            return SUPPORT_GREETING.to_string();
        }
        self.replies[turn % self.replies.len()].clone()
    }
}

pub fn greeting(at: DateTime<Utc>) -> SupportMessage {
    SupportMessage::new(SUPPORT_GREETING, MessageSender::Support, at)
}

pub fn user_turns(thread: &[SupportMessage]) -> usize {
    thread
        .iter()
        .filter(|message| message.sender == MessageSender::User)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies_rotate_deterministically() {
        let responder = ScriptedResponder::default();

        let first = responder.reply("Oi", 0);
        let second = responder.reply("Oi", 1);
        assert_eq!(first, "Entendi. Vamos verificar isso para você.");
        assert_ne!(first, second);
        assert_eq!(responder.reply("qualquer", 4), first);
        assert_eq!(responder.reply("Oi", 1), second);
    }

    #[test]
    fn test_empty_script_falls_back_to_greeting() {
        let responder = ScriptedResponder::new(Vec::new());
        assert_eq!(responder.reply("Oi", 3), SUPPORT_GREETING);
    }

    #[test]
    fn test_user_turns_counts_only_user_messages() {
        let now = Utc::now();
        let thread = vec![
            greeting(now),
            SupportMessage::new("Minha torneira quebrou", MessageSender::User, now),
            SupportMessage::new("Entendi.", MessageSender::Support, now),
        ];
        assert_eq!(user_turns(&thread), 1);
        assert_eq!(thread[0].sender, MessageSender::Support);
    }
}
