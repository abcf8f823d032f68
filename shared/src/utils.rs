// Display formatting shared by the engine's text shell and any other
// presentation layer: thousands-separated numbers matching the original
// dashboard's "{:,.2f} THB" / "{:,.0f} Pcs" metric style.

/// Formats a non-negative-or-negative value with comma thousands separators
/// and a fixed number of decimals, e.g. `1234567.891` -> `"1,234,567.89"`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (number, sign) = match formatted.strip_prefix('-') {
        Some(rest) => (rest, "-"),
        None => (formatted.as_str(), ""),
    };
    let (int_part, frac_part) = match number.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Sales amount with the original dashboard's currency unit.
pub fn format_thb(value: f64) -> String {
    format!("{} THB", format_thousands(value, 2))
}

/// Quantity with the original dashboard's unit.
pub fn format_pcs(value: f64) -> String {
    format!("{} Pcs", format_thousands(value, 0))
}

/// Signed percentage with one decimal, e.g. `50.0` -> `"+50.0%"`.
pub fn format_pct(value: f64) -> String {
    format!("{:+.1}%", value)
}
