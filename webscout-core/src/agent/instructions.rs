/// System message for a new conversation: the configured prompt followed by
/// any guidance the tool server sent during the handshake.
pub fn compose_system_prompt(base: &str, server_instructions: Option<&str>) -> String {
    match server_instructions.map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{}\n\n{extra}", base.trim_end()),
        _ => base.to_string(),
    }
}
