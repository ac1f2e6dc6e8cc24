use caseco_auth::AuthSession;
use caseco_core::auth::AuthUser;
use caseco_core::tables::TableName;

use crate::error::Result;

/// One entry of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminModule {
    pub name: &'static str,
    pub table: TableName,
    pub description: &'static str,
}

pub const ADMIN_MODULES: [AdminModule; 4] = [
    AdminModule {
        name: "Manufacturers",
        table: TableName::Manufacturers,
        description: "Manage manufacturer information and logos",
    },
    AdminModule {
        name: "Products",
        table: TableName::Products,
        description: "Manage product catalog and details",
    },
    AdminModule {
        name: "Navigation Items",
        table: TableName::NavItems,
        description: "Manage website navigation structure",
    },
    AdminModule {
        name: "Downloads",
        table: TableName::Downloads,
        description: "Manage downloadable resources and documents",
    },
];

/// Landing view of the admin panel. Only reachable when signed in.
#[derive(Debug, Clone)]
pub struct Dashboard {
    user: AuthUser,
}

impl Dashboard {
    pub async fn open(session: &AuthSession) -> Result<Self> {
        let user = session.require_authenticated().await?;
        Ok(Self { user })
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn modules(&self) -> &'static [AdminModule] {
        &ADMIN_MODULES
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use caseco_auth::MockIdentityProvider;
    use caseco_core::auth::UserAttributes;

    use super::*;
    use crate::error::ClientError;

    #[tokio::test]
    async fn test_requires_sign_in() {
        let provider = MockIdentityProvider::new().with_user(
            "admin",
            "pw",
            UserAttributes::new().with("email", "admin@caseco-inc.com"),
        );
        let session = AuthSession::new(Arc::new(provider));
        session.initialize().await;

        let err = Dashboard::open(&session).await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));

        session.sign_in("admin", "pw").await.unwrap();
        let dashboard = Dashboard::open(&session).await.unwrap();
        assert_eq!(dashboard.user().display_name(), "admin@caseco-inc.com");
        assert_eq!(dashboard.modules().len(), 4);
        assert_eq!(dashboard.modules()[2].table, TableName::NavItems);
    }
}
