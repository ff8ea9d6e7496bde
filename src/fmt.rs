/// Format a balance as an AED amount with thousands separators: AED 1,234.56
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-AED {with_commas}.{dec_part}")
    } else {
        format!("AED {with_commas}.{dec_part}")
    }
}

/// Elapsed years for display, rounded to two decimals. Tier assignment uses
/// the unrounded value; this is presentation only.
pub fn years(val: f64) -> String {
    format!("{val:.2}")
}
