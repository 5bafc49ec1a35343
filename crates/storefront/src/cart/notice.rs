//! User-facing cart notifications.

use serde::Serialize;

/// The cart operation a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl CartOperation {
    /// Generic failure notice for this operation.
    #[must_use]
    pub const fn failure_notice(self) -> CartNotice {
        match self {
            Self::Add => CartNotice::AddFailed,
            Self::Remove => CartNotice::RemoveFailed,
            Self::Update => CartNotice::UpdateFailed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
        }
    }
}

/// Notification shown to the shopper when a cart operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartNotice {
    /// Requested quantity is out of stock.
    StockExceeded,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateFailed,
}

impl CartNotice {
    /// Message displayed to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::StockExceeded => "Quantidade solicitada fora de estoque",
            Self::AddFailed => "Erro na adição do produto",
            Self::RemoveFailed => "Erro na remoção do produto",
            Self::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for CartNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notices() {
        assert_eq!(CartOperation::Add.failure_notice(), CartNotice::AddFailed);
        assert_eq!(CartOperation::Remove.failure_notice(), CartNotice::RemoveFailed);
        assert_eq!(CartOperation::Update.failure_notice(), CartNotice::UpdateFailed);
    }

    #[test]
    fn test_messages_are_distinct() {
        let notices = [
            CartNotice::StockExceeded,
            CartNotice::AddFailed,
            CartNotice::RemoveFailed,
            CartNotice::UpdateFailed,
        ];
        for (i, a) in notices.iter().enumerate() {
            for b in notices.iter().skip(i + 1) {
                assert_ne!(a.message(), b.message());
            }
        }
        assert_eq!(
            CartNotice::StockExceeded.to_string(),
            "Quantidade solicitada fora de estoque"
        );
    }
}
