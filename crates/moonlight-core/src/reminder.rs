//! # Balance Reminder
//!
//! Builds the templated balance-reminder message and the WhatsApp deep link
//! used by the customer screen's "Remind" action.
//!
//! Message delivery is the messaging app's problem; this module only
//! produces the text and the link.

use crate::money::Money;

/// The reminder message, verbatim from the customer screen template.
pub fn reminder_message(business_name: &str, balance: Money) -> String {
    format!(
        "Hello! This is a friendly reminder from {}. You have an outstanding balance of {}. \
         We'd appreciate your payment at your earliest convenience. Thank you!",
        business_name, balance
    )
}

/// Normalizes a phone number to digits only, as the deep link requires.
///
/// `+234 803-555 1234` becomes `2348035551234`. Formatting is preserved in
/// storage; only the link is normalized.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Builds a `https://wa.me/<digits>?text=<message>` deep link.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_message() {
        let message = reminder_message("Moonlight Scent", Money::from_cents(1_500_000));
        assert_eq!(
            message,
            "Hello! This is a friendly reminder from Moonlight Scent. You have an \
             outstanding balance of ₦15,000.00. We'd appreciate your payment at your \
             earliest convenience. Thank you!"
        );
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+234 803-555 1234"), "2348035551234");
        assert_eq!(normalize_phone("(0803) 555.1234"), "08035551234");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_whatsapp_link() {
        let link = whatsapp_link("+234 803 555 1234", "Hello there!");
        assert_eq!(link, "https://wa.me/2348035551234?text=Hello%20there%21");
    }

    #[test]
    fn test_whatsapp_link_encodes_full_message() {
        let message = reminder_message("Moonlight Scent", Money::from_cents(50_000));
        let link = whatsapp_link("0803 555 1234", &message);

        assert!(link.starts_with("https://wa.me/08035551234?text="));
        // No raw spaces survive in the query.
        let query = link.split("text=").nth(1).unwrap();
        assert!(!query.contains(' '));
    }
}
