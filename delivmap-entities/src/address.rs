use std::fmt;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street : Option<String>,
    pub city   : Option<String>,
    pub state  : Option<String>,
    pub zip    : Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

/// Joins all present, non-empty parts with `", "`.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in [&self.street, &self.city, &self.state, &self.zip]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
        {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_partial_address() {
        let mut addr = Address {
            street: Some("A street".into()),
            city: Some("A city".into()),
            ..Default::default()
        };
        assert_eq!("A street, A city", addr.to_string());
        addr.state = Some("MN".into());
        addr.zip = Some("55318".into());
        assert_eq!("A street, A city, MN, 55318", addr.to_string());
        addr.street = None;
        addr.city = Some(String::new());
        assert_eq!("MN, 55318", addr.to_string());
    }
}
