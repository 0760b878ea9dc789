//! Property tests over arbitrary identifiers and keys.

use crate::common::{TEST_API_KEY, app, get_authenticated};
use axum::http::StatusCode;
use proptest::prelude::*;
use scim_gateway::auth::{ApiKeyAuthenticator, AuthConfig, AuthenticationError};
use scim_gateway::{ErrorKind, SchemaRegistry};

proptest! {
    #[test]
    fn test_unregistered_schema_ids_are_not_found(id in "\\PC{0,64}") {
        let registry = SchemaRegistry::new().unwrap();
        prop_assume!(!registry.contains_schema(&id));

        let err = registry.get_schema(&id).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unregistered_urns_answer_404(suffix in "[A-Za-z0-9]{1,24}") {
        let id = format!("urn:example:params:scim:schemas:{}", suffix);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let response = runtime.block_on(get_authenticated(app(), &format!("/scim/v2/Schemas/{}", id)));
        prop_assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_only_the_configured_key_authenticates(key in "[!-~]{1,40}") {
        let gate = ApiKeyAuthenticator::new(&AuthConfig::new(TEST_API_KEY).unwrap());
        prop_assume!(key != TEST_API_KEY);
        // A lone scheme word carries no key at all.
        prop_assume!(!key.eq_ignore_ascii_case("bearer"));

        prop_assert_eq!(
            gate.authenticate(Some(&key)).unwrap_err(),
            AuthenticationError::InvalidCredential
        );
    }
}
