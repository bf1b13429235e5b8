/// Renders the codes as a double-quoted C string literal made of `\xHH`
/// escapes only.
pub fn c_string<I>(codes: I) -> String
where
    I: IntoIterator<Item = u8>,
{
    let codes = codes.into_iter();
    let mut literal = String::with_capacity(2 + 4 * codes.size_hint().0);

    literal.push('"');
    for code in codes {
        literal.push_str(&format!("\\x{code:02x}"));
    }
    literal.push('"');

    literal
}
