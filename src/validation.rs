//! Client-side field checks performed before any remote call.
//!
//! These mirror what the task and registration forms enforce: non-blank
//! required fields, sane hour/minute ranges, reminders that are not in the
//! past, and a matching password confirmation. A failed check is reported
//! immediately as a `ValidationError`, before any network round-trip.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

/// Wire format for reminder timestamps (`2025-01-01 09:00`).
pub const REMINDER_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Check that a task's required text fields are present.
pub fn validate_task_fields(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(ValidationError::MissingTaskFields);
    }
    Ok(())
}

/// Build a reminder string from date + time-of-day components.
///
/// Rejects out-of-range hours/minutes and reminders earlier than the
/// current local time.
pub fn build_reminder(
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Result<String, ValidationError> {
    if hour > 23 || minute > 59 {
        return Err(ValidationError::InvalidTime);
    }

    // and_hms_opt cannot fail after the range check above
    let reminder = date
        .and_hms_opt(hour, minute, 0)
        .ok_or(ValidationError::InvalidTime)?;

    validate_reminder_not_past(&reminder)?;
    Ok(reminder.format(REMINDER_FORMAT).to_string())
}

/// Parse and validate an already formatted reminder string.
pub fn validate_reminder(reminder: &str) -> Result<(), ValidationError> {
    let parsed = NaiveDateTime::parse_from_str(reminder, REMINDER_FORMAT)
        .map_err(|_| ValidationError::InvalidTime)?;
    validate_reminder_not_past(&parsed)
}

fn validate_reminder_not_past(reminder: &NaiveDateTime) -> Result<(), ValidationError> {
    if *reminder < Local::now().naive_local() {
        return Err(ValidationError::ReminderInPast);
    }
    Ok(())
}

/// Check login form fields.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Check registration form fields, including the password confirmation.
pub fn validate_registration(
    name: &str,
    email: &str,
    whatsapp: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if name.trim().is_empty()
        || email.trim().is_empty()
        || whatsapp.trim().is_empty()
        || password.is_empty()
    {
        return Err(ValidationError::MissingRegistrationFields);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
