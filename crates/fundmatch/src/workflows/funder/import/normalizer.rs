/// Removes BOM and zero-width characters and collapses runs of whitespace.
/// Case is preserved: status labels and grant titles match exactly downstream.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
