/// Entry point of the external real-time room subsystem. It owns all room
/// state; this service only hands the display name over.
pub const ROOM_PATH: &str = "/websocket/room";

const MISSING_NAME_MESSAGE: &str = "Please choose a nick name and the demonstration type.";

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

/// Validates a chosen display name and returns the redirect target for the
/// room endpoint. The name is trimmed before the presence check and the
/// trimmed form is forwarded.
pub fn enter(display_name: &str) -> Result<String, ValidationError> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            message: MISSING_NAME_MESSAGE.to_string(),
        });
    }

    Ok(format!("{}?user={}", ROOM_PATH, urlencoding::encode(trimmed)))
}
