use std::fmt;

use crate::error::RequestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Depth(u8);

impl Depth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 2;

    pub fn new(value: i64) -> Result<Self, RequestError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RequestError::DepthOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn parse(raw: Option<&str>) -> Result<Self, RequestError> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty());
        let Some(raw) = raw else {
            return Err(RequestError::MissingDepth);
        };

        let value = raw
            .parse::<i64>()
            .map_err(|_| RequestError::NonNumericDepth(raw.to_owned()))?;
        Self::new(value)
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlRequest {
    seed: String,
    depth: Depth,
}

impl CrawlRequest {
    pub fn new(seed: &str, depth: i64) -> Result<Self, RequestError> {
        Ok(Self {
            seed: Self::validate_seed(seed)?,
            depth: Depth::new(depth)?,
        })
    }

    pub fn parse(seed: &str, depth: Option<&str>) -> Result<Self, RequestError> {
        Ok(Self {
            seed: Self::validate_seed(seed)?,
            depth: Depth::parse(depth)?,
        })
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    fn validate_seed(seed: &str) -> Result<String, RequestError> {
        let seed = seed.trim();
        if seed.is_empty() {
            Err(RequestError::EmptySeed)
        } else {
            Ok(seed.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_and_two() {
        assert_eq!(Depth::new(1).map(Depth::get), Ok(1));
        assert_eq!(Depth::new(2).map(Depth::get), Ok(2));
    }

    #[test]
    fn rejects_out_of_range_depths() {
        for value in [-1, 0, 3, 10] {
            assert_eq!(
                Depth::new(value),
                Err(RequestError::DepthOutOfRange {
                    value,
                    min: 1,
                    max: 2
                })
            );
        }
    }

    #[test]
    fn parses_raw_depth_input() {
        assert_eq!(Depth::parse(Some(" 2 ")).map(Depth::get), Ok(2));
        assert_eq!(Depth::parse(None), Err(RequestError::MissingDepth));
        assert_eq!(Depth::parse(Some("  ")), Err(RequestError::MissingDepth));
        assert_eq!(
            Depth::parse(Some("two")),
            Err(RequestError::NonNumericDepth("two".to_owned()))
        );
        assert!(matches!(
            Depth::parse(Some("3")),
            Err(RequestError::DepthOutOfRange { value: 3, .. })
        ));
    }

    #[test]
    fn seed_must_not_be_blank() {
        assert_eq!(CrawlRequest::new("  ", 1), Err(RequestError::EmptySeed));
        let request = CrawlRequest::parse(" alice ", Some("1")).expect("valid request");
        assert_eq!(request.seed(), "alice");
        assert_eq!(request.depth().get(), 1);
    }
}
