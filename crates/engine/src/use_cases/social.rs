//! Social log use cases - chat lines, whispers, system notices.

use vtt_domain::{DomainError, SocialEvent, Speaker};

use crate::entities::NotificationSink;

/// Posts social entries. Blank content is rejected.
pub struct SocialFeed<'a> {
    log: &'a mut dyn NotificationSink,
}

impl<'a> SocialFeed<'a> {
    pub fn new(log: &'a mut dyn NotificationSink) -> Self {
        Self { log }
    }

    pub fn send_message(self, sender: Speaker, content: &str) -> Result<(), DomainError> {
        let content = non_blank(content)?;
        self.log.post(SocialEvent::Message { sender, content }.into());
        Ok(())
    }

    pub fn whisper(self, from: Speaker, to: &str, content: &str) -> Result<(), DomainError> {
        let content = non_blank(content)?;
        let to = to.trim();
        if to.is_empty() {
            return Err(DomainError::validation("Whisper needs a recipient"));
        }
        self.log.post(
            SocialEvent::Whisper {
                from,
                to: to.to_string(),
                content,
            }
            .into(),
        );
        Ok(())
    }

    pub fn system(self, content: &str) -> Result<(), DomainError> {
        let content = non_blank(content)?;
        self.log.post(SocialEvent::System { content }.into());
        Ok(())
    }
}

fn non_blank(content: &str) -> Result<String, DomainError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Message cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtt_domain::NotificationPayload;

    #[test]
    fn message_is_trimmed_and_posted() {
        let mut log: Vec<NotificationPayload> = Vec::new();
        SocialFeed::new(&mut log)
            .send_message(Speaker::named("Ayla"), "  well met  ")
            .unwrap();
        assert_eq!(
            log,
            vec![NotificationPayload::Social(SocialEvent::Message {
                sender: Speaker::named("Ayla"),
                content: "well met".into(),
            })]
        );
    }

    #[test]
    fn when_content_blank_nothing_is_posted() {
        let mut log: Vec<NotificationPayload> = Vec::new();
        assert!(SocialFeed::new(&mut log).system("   ").is_err());
        assert!(SocialFeed::new(&mut log)
            .whisper(Speaker::named("Ayla"), "", "psst")
            .is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn whisper_keeps_the_recipient() {
        let mut log: Vec<NotificationPayload> = Vec::new();
        SocialFeed::new(&mut log)
            .whisper(Speaker::named("Ayla"), "Borin", "behind you")
            .unwrap();
        assert!(matches!(
            &log[..],
            [NotificationPayload::Social(SocialEvent::Whisper { to, .. })] if to == "Borin"
        ));
    }
}
