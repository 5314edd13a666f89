//! Shortest round-trip float rendering in `%G` style.
//!
//! Digits come from Rust's shortest `{:e}` formatting at the value's own
//! precision, so `0.1f32` renders as `0.1` rather than its widened `f64`
//! expansion. Exponent form is used when the decimal exponent is below -4 or
//! at least 6.

pub(super) fn format_f32(v: f32) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    render(&format!("{v:e}"))
}

pub(super) fn format_f64(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    render(&format!("{v:e}"))
}

/// Re-layout a `{:e}` string (`-1.2345e3`) as `%G`.
fn render(sci: &str) -> String {
    let (neg, body) = match sci.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, sci),
    };
    let (mantissa, exp) = body.split_once('e').unwrap_or((body, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa.bytes().filter(|b| *b != b'.').collect();
    let nd = digits.len() as i32;
    let dp = exp + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if neg {
        out.push('-');
    }

    if exp < -4 || exp >= 6 {
        out.push(digits[0] as char);
        if nd > 1 {
            out.push('.');
            out.extend(digits[1..].iter().map(|b| *b as char));
        }
        out.push('E');
        out.push(if exp < 0 { '-' } else { '+' });
        let abs = exp.unsigned_abs();
        if abs < 10 {
            out.push('0');
        }
        out.push_str(&abs.to_string());
        return out;
    }

    if dp <= 0 {
        out.push('0');
    } else {
        for i in 0..dp {
            out.push(digit_at(&digits, i));
        }
    }
    if nd > dp {
        out.push('.');
        for i in dp..nd {
            out.push(digit_at(&digits, i));
        }
    }
    out
}

fn digit_at(digits: &[u8], i: i32) -> char {
    if i < 0 || i as usize >= digits.len() {
        '0'
    } else {
        digits[i as usize] as char
    }
}
