/// Default page size when the client does not supply one
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Normalized pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u64,
    /// Rows per page, always at least 1
    pub size: u64,
}

impl PageRequest {
    pub fn from_params(page: Option<u64>, size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_params(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_when_params_absent() {
        let req = PageRequest::from_params(None, None);
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_zero_size_is_clamped_to_one() {
        let req = PageRequest::from_params(Some(3), Some(0));
        assert_eq!(req.page, 3);
        assert_eq!(req.size, 1);
    }
}
