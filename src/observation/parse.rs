//! Parser for tab-separated sexagesimal observation tables.
//!
//! Each row carries ten fields: latitude as `deg min sec hemisphere`,
//! longitude the same, then azimuth and altitude in decimal degrees.
//! Decimal commas are accepted and normalized to dots. Blank lines are
//! ignored; anything else malformed is a [`ParseError`] carrying the
//! 1-based line number.

use thiserror::Error;

use super::Observation;

/// Errors that can occur while parsing an observation table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected 10 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: cannot parse '{token}' as a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: unknown hemisphere letter '{token}' (expected N, S, E or W)")]
    InvalidHemisphere { line: usize, token: String },
}

/// Parses a complete observation table into radian observations.
///
/// Row order is preserved; row `i` of the output is frame `i` of the
/// animation. An empty (or all-whitespace) input yields an empty sequence.
pub fn parse_table(text: &str) -> Result<Vec<Observation>, ParseError> {
    let mut rows = Vec::new();

    for (index, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.trim_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_row(line, index + 1)?);
    }

    Ok(rows)
}

fn parse_row(line: &str, line_no: usize) -> Result<Observation, ParseError> {
    let normalized = line.replace(',', ".");
    let fields: Vec<&str> = normalized.split('\t').collect();
    if fields.len() != 10 {
        return Err(ParseError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let lat = parse_sexagesimal(&fields[0..4], line_no)?;
    let lon = parse_sexagesimal(&fields[4..8], line_no)?;
    let azm = parse_number(fields[8], line_no)?;
    let alt = parse_number(fields[9], line_no)?;

    Ok(Observation::from_degrees(lat, lon, azm, alt))
}

/// Recombines `deg min sec hemisphere` into signed decimal degrees.
fn parse_sexagesimal(fields: &[&str], line_no: usize) -> Result<f64, ParseError> {
    let deg = parse_number(fields[0], line_no)?;
    let min = parse_number(fields[1], line_no)?;
    let sec = parse_number(fields[2], line_no)?;
    let sign = hemisphere_sign(fields[3], line_no)?;
    Ok((deg + min / 60.0 + sec / 3600.0) * sign)
}

fn parse_number(token: &str, line_no: usize) -> Result<f64, ParseError> {
    token.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        token: token.trim().to_string(),
    })
}

fn hemisphere_sign(token: &str, line_no: usize) -> Result<f64, ParseError> {
    match token.trim() {
        "N" | "n" | "E" | "e" => Ok(1.0),
        "W" | "w" | "S" | "s" => Ok(-1.0),
        other => Err(ParseError::InvalidHemisphere {
            line: line_no,
            token: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lat: &str, lon: &str, azm: &str, alt: &str) -> String {
        format!("{}\t{}\t{}\t{}", lat, lon, azm, alt)
    }

    #[test]
    fn test_parses_single_row() {
        let text = row("59\t36\t30\tN", "18\t4\t0\tE", "120.5", "45.25");
        let rows = parse_table(&text).unwrap();
        assert_eq!(rows.len(), 1);

        let expected_lat = (59.0 + 36.0 / 60.0 + 30.0 / 3600.0_f64).to_radians();
        let expected_lon = (18.0 + 4.0 / 60.0_f64).to_radians();
        assert!((rows[0].lat - expected_lat).abs() < 1e-12);
        assert!((rows[0].lon - expected_lon).abs() < 1e-12);
        assert!((rows[0].azm - 120.5_f64.to_radians()).abs() < 1e-12);
        assert!((rows[0].alt - 45.25_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_west_and_south_negate() {
        let text = row("10\t0\t0\tS", "20\t30\t0\tW", "0", "0");
        let rows = parse_table(&text).unwrap();
        assert!((rows[0].lat + 10.0_f64.to_radians()).abs() < 1e-12);
        assert!((rows[0].lon + 20.5_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_commas_are_normalized() {
        let text = row("0\t0\t0\tN", "0\t0\t0\tE", "12,5", "-3,75");
        let rows = parse_table(&text).unwrap();
        assert!((rows[0].azm - 12.5_f64.to_radians()).abs() < 1e-12);
        assert!((rows[0].alt + 3.75_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_row_order() {
        let text = format!(
            "{}\n{}\n",
            row("1\t0\t0\tN", "0\t0\t0\tE", "0", "0"),
            row("2\t0\t0\tN", "0\t0\t0\tE", "0", "0"),
        );
        let rows = parse_table(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].lat < rows[1].lat);
    }

    #[test]
    fn test_blank_input_and_lines() {
        assert!(parse_table("").unwrap().is_empty());
        assert!(parse_table("  \n\n  ").unwrap().is_empty());

        let text = format!("\n{}\n\n", row("0\t0\t0\tN", "0\t0\t0\tE", "1", "2"));
        assert_eq!(parse_table(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!(
            "{}\r\n{}",
            row("0\t0\t0\tN", "0\t0\t0\tE", "0", "0"),
            row("0\t0\t0\tN", "0\t0\t0\tE", "0", "0"),
        );
        assert_eq!(parse_table(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_field_count_error_carries_line_number() {
        let good = row("0\t0\t0\tN", "0\t0\t0\tE", "0", "0");
        let text = format!("{}\n1\t2\t3", good);
        let err = parse_table(&text).unwrap_err();
        assert_eq!(err, ParseError::FieldCount { line: 2, found: 3 });
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let text = row("abc\t0\t0\tN", "0\t0\t0\tE", "0", "0");
        let err = parse_table(&text).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_bad_hemisphere_is_rejected() {
        let text = row("0\t0\t0\tX", "0\t0\t0\tE", "0", "0");
        let err = parse_table(&text).unwrap_err();
        assert!(matches!(err, ParseError::InvalidHemisphere { line: 1, .. }));
    }
}
