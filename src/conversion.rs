use crate::constants::{Degree, Hours};
use crate::planisphere_errors::PlanisphereError;

/// Split a sexagesimal field into its three numeric components.
///
/// Accepts either whitespace or `:` as separator. The last component may carry a
/// fractional part; the first may carry a sign.
fn split_sexagesimal(field: &str) -> Option<(f64, f64, f64, bool)> {
    let parts: Vec<&str> = field
        .split(|c: char| c.is_whitespace() || c == ':')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }

    let negative = parts[0].starts_with('-');
    let a: f64 = parts[0].trim_start_matches(&['-', '+'][..]).parse().ok()?;
    let b: f64 = parts[1].parse().ok()?;
    let c: f64 = parts[2].parse().ok()?;

    if !(0.0..60.0).contains(&b) || !(0.0..60.0).contains(&c) {
        return None;
    }
    Some((a, b, c, negative))
}

/// Parse a right ascension string to hours
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///   (`HH:MM:SS.SS` is accepted too)
///
/// Returns
/// -------
/// * `Option<Hours>`: the right ascension in hours, `None` if the input is malformed
///   or lies outside `[0, 24)`.
pub fn parse_ra_to_hours(ra: &str) -> Option<Hours> {
    let (h, m, s, negative) = split_sexagesimal(ra)?;
    if negative {
        return None;
    }
    let hours = h + m / 60.0 + s / 3600.0;
    (hours < 24.0).then_some(hours)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: a string representing the declination in the format `±DD MM SS.SS`
///
/// Returns
/// -------
/// * `Option<Degree>`: the declination in degrees, `None` if the input is malformed
///   or lies outside `[-90, 90]`.
pub fn parse_dec_to_deg(dec: &str) -> Option<Degree> {
    let (d, m, s, negative) = split_sexagesimal(dec)?;
    let sign = if negative { -1.0 } else { 1.0 };
    let deg = sign * (d + m / 60.0 + s / 3600.0);
    (-90.0..=90.0).contains(&deg).then_some(deg)
}

/// Parse a sidereal time written as `HH:MM` or `HH:MM:SS` into hours.
///
/// The two-field form is the one stored in observer configurations.
pub fn parse_sidereal_time(lst: &str) -> Result<Hours, PlanisphereError> {
    let err = || PlanisphereError::SiderealParse(lst.to_string());

    let parts: Vec<&str> = lst.trim().split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(err()),
    };

    let h: f64 = h.trim().parse().map_err(|_| err())?;
    let m: f64 = m.trim().parse().map_err(|_| err())?;
    let s: f64 = s.trim().parse().map_err(|_| err())?;

    if !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return Err(err());
    }
    Ok(h + m / 60.0 + s / 3600.0)
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ra_to_hours() {
        assert_relative_eq!(
            parse_ra_to_hours("22 52 23.37").unwrap(),
            22.873158333333333,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parse_ra_to_hours("06:45:08.9").unwrap(),
            6.752472222222222,
            epsilon = 1e-12
        );
        assert_eq!(parse_ra_to_hours("1 2 3.4.5"), None);
        assert_eq!(parse_ra_to_hours("1 2"), None);
        assert_eq!(parse_ra_to_hours("24 00 00"), None);
        assert_eq!(parse_ra_to_hours("-01 00 00"), None);
    }

    #[test]
    fn test_dec_to_deg() {
        assert_relative_eq!(
            parse_dec_to_deg("-00 30 14.2").unwrap(),
            -0.5039444444444444,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parse_dec_to_deg("+13 55 42.7").unwrap(),
            13.928527777777777,
            epsilon = 1e-12
        );
        assert_eq!(parse_dec_to_deg("89 15 50.2.3"), None);
        assert_eq!(parse_dec_to_deg("91 00 00"), None);
        assert_eq!(parse_dec_to_deg("45 61 00"), None);
    }

    #[test]
    fn test_sidereal_time() {
        assert_relative_eq!(parse_sidereal_time("12:30").unwrap(), 12.5);
        assert_relative_eq!(parse_sidereal_time("06:15:36").unwrap(), 6.26);
        assert_eq!(
            parse_sidereal_time("25:00"),
            Err(PlanisphereError::SiderealParse("25:00".into()))
        );
        assert!(parse_sidereal_time("noon").is_err());
    }
}
