//! Parsing of matrices and vectors written on the command line

use std::str::FromStr;

use anyhow::{Context, bail};

/// Parse whitespace or comma separated entries
pub fn parse_row<T>(input: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let row = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<T>().with_context(|| format!("invalid entry '{token}'")))
        .collect::<anyhow::Result<Vec<T>>>()?;

    if row.is_empty() {
        bail!("expected at least one entry");
    }
    Ok(row)
}

/// Parse rows separated by `;`
pub fn parse_rows<T>(input: &str) -> anyhow::Result<Vec<Vec<T>>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    input
        .split(';')
        .enumerate()
        .map(|(index, row)| parse_row(row).with_context(|| format!("row {index}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_algebra::{Integer, Rational};

    #[test]
    fn test_rows_and_separators() {
        let rows: Vec<Vec<Integer>> = parse_rows("1 2, 3; 4,5 6").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![Integer::from(4), Integer::from(5), Integer::from(6)]);
    }

    #[test]
    fn test_fractions() {
        let row: Vec<Rational> = parse_row("1/2 -3").unwrap();
        assert_eq!(row, vec![Rational::new(1, 2).unwrap(), Rational::from(-3)]);
    }

    #[test]
    fn test_errors_name_the_entry() {
        let err = parse_rows::<Integer>("1 2; x 4").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("row 1"));
        assert!(message.contains("invalid entry 'x'"));

        assert!(parse_row::<Integer>("  ").is_err());
    }
}
