use crate::error::{Error, Result};

const DEFAULT_PAGE_SIZE: u32 = 10;
// Cap to prevent excessive requests
const MAX_PAGE_SIZE: u32 = 100;

/// One-based page / page-size pair, already validated.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// Parse raw query-string values. Both must be positive integers when
    /// present; anything else is a `BadRequest`.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Result<Self> {
        let page = parse_positive(page, 1)?;
        let page_size = parse_positive(page_size, DEFAULT_PAGE_SIZE)?;
        Ok(Self {
            page,
            page_size: page_size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>, default: u32) -> Result<u32> {
    match raw {
        None => Ok(default),
        Some(s) => match s.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(Error::BadRequest("Invalid pagination parameters".into())),
        },
    }
}
