use super::Sink;

/// Mock email delivery. Nothing is sent; the would-be message is logged.
#[derive(Debug, Clone)]
pub struct EmailSink {
    recipient: String,
}

impl EmailSink {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    pub fn subject() -> String {
        format!(
            "Report generated at {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

impl Sink for EmailSink {
    fn export(&self, formatted: &str) -> bool {
        tracing::info!(
            recipient = %self.recipient,
            subject = %Self::subject(),
            body_chars = formatted.chars().count(),
            "[MOCK] Email sent"
        );
        true
    }

    fn method_name(&self) -> String {
        format!("Email to {}", self.recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_always_delivers() {
        let sink = EmailSink::new("sales@company.com");
        assert!(sink.export("body"));
        assert_eq!(sink.method_name(), "Email to sales@company.com");
        assert!(EmailSink::subject().starts_with("Report generated at "));
    }
}
