pub fn symbol() -> String {
    "LOGO_RLE".to_string()
}
pub fn header() -> bool {
    true
}
pub fn extension() -> String {
    "c".to_string()
}
