/// Letters a variable or function name may consist of.
///
/// Uppercase Greek letters that look like Latin ones are left out.
pub const NAME_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                αβγδεζηθικλμνξπρσςτυφχψωΓΔΘΛΞΠΣΥΦΨΩ";

/// Names that cannot be declared.
pub const RESERVED_WORDS: &[&str] = &["ans",
                                      "summation",
                                      "product",
                                      "frac",
                                      "abs",
                                      "log",
                                      "sqrt",
                                      "nthroot",
                                      "matrix"];

fn is_name_letter(c: char) -> bool {
    NAME_LETTERS.contains(c)
}

fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Tests whether a symbol run is a number literal.
///
/// A literal is `∞`, or starts with a decimal digit or a point and holds at
/// most one point. Letters are allowed after the first character since they
/// are digits in bases above ten; whether they are valid in the working base
/// is decided when the literal is parsed.
///
/// # Example
/// ```
/// use bigcalc::interpreter::parser::utils::is_number;
///
/// assert!(is_number("12.5"));
/// assert!(is_number(".5"));
/// assert!(is_number("0FF"));
/// assert!(!is_number("FF"));
/// assert!(!is_number("1.2.3"));
/// ```
#[must_use]
pub fn is_number(s: &str) -> bool {
    if s == "∞" {
        return true;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() || c == '.' => {},
        _ => return false,
    }

    let rest = chars.as_str();
    let points = s.matches('.').count();
    points <= 1 && rest.chars().all(|c| is_alphanumeric(c) || c == '.')
}

/// Tests whether a symbol run is a valid variable or function name.
///
/// # Example
/// ```
/// use bigcalc::interpreter::parser::utils::is_variable;
///
/// assert!(is_variable("x1"));
/// assert!(is_variable("αβ"));
/// assert!(!is_variable("1x"));
/// assert!(!is_variable("x.y"));
/// ```
#[must_use]
pub fn is_variable(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_letter(c) => chars.all(|c| is_name_letter(c) || c.is_ascii_digit()),
        _ => false,
    }
}

#[must_use]
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_is_a_number_but_not_a_name() {
        assert!(is_number("∞"));
        assert!(!is_variable("∞"));
        assert!(!is_number("∞1"));
    }

    #[test]
    fn lone_point_is_a_number_run() {
        assert!(is_number("."));
        assert!(is_number("5."));
    }

    #[test]
    fn reserved_words() {
        assert!(is_reserved_word("ans"));
        assert!(is_reserved_word("matrix"));
        assert!(!is_reserved_word("sin"));
    }
}
