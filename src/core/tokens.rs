/// 單調遞增的請求代號，用來丟棄過期的自動完成回應
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// 發出新代號；之前發出的代號全部失效
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase_and_only_latest_is_current() {
        let mut tokens = RequestTokens::new();
        let first = tokens.issue();
        assert!(tokens.is_latest(first));

        let second = tokens.issue();
        assert!(second > first);
        assert!(!tokens.is_latest(first));
        assert!(tokens.is_latest(second));
        assert_eq!(second.value(), 2);
    }
}
