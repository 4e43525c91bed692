//! Integration tests for the permission manager over the in-memory engine.

use std::sync::Arc;

use async_trait::async_trait;

use larke_auth::permission::{EnforcerRegistry, MemoryPolicyEngine, PermissionManager};
use larke_core::config::PermissionConfig;
use larke_core::error::{AppError, ErrorKind};
use larke_core::result::AppResult;
use larke_core::traits::PolicyEngine;
use larke_core::types::{DomainScope, PolicyRule};

fn manager() -> PermissionManager {
    EnforcerRegistry::from_config(&PermissionConfig::default())
        .manager(None)
        .unwrap()
}

#[tokio::test]
async fn test_editor_publishes_in_blog() {
    let pm = manager();
    pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap();
    pm.add_policy("editor", "article", "publish").await.unwrap();

    assert!(pm.enforce_in("alice", &["blog"], "article", "publish").await.unwrap());
    assert!(!pm.enforce_in("alice", &["blog"], "article", "delete").await.unwrap());
}

#[tokio::test]
async fn test_enforce_direct_inherited_and_missing() {
    let pm = manager();
    pm.add_permission_for_user("alice", "article", "edit").await.unwrap();
    pm.add_role_for_user("bob", "editor", &[]).await.unwrap();
    pm.add_policy("editor", "article", "publish").await.unwrap();

    assert!(pm.enforce("alice", "article", "edit").await.unwrap());
    assert!(pm.enforce("bob", "article", "publish").await.unwrap());
    assert!(!pm.enforce("bob", "article", "edit").await.unwrap());
    assert!(!pm.enforce("carol", "article", "publish").await.unwrap());
}

#[tokio::test]
async fn test_role_assignment_is_idempotent() {
    let pm = manager();
    assert!(pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap());
    assert!(!pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap());

    assert_eq!(pm.get_roles_for_user("alice", &["blog"]).await.unwrap(), vec!["editor"]);
    assert_eq!(pm.get_users_for_role("editor", &["blog"]).await.unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn test_delete_role_cascades_to_every_user() {
    let pm = manager();
    pm.add_role_for_user("alice", "editor", &[]).await.unwrap();
    pm.add_role_for_user("bob", "editor", &[]).await.unwrap();
    pm.add_role_for_user("bob", "viewer", &[]).await.unwrap();
    pm.add_policy("editor", "article", "publish").await.unwrap();

    assert!(pm.delete_role("editor").await.unwrap());

    assert!(pm.get_roles_for_user("alice", &[]).await.unwrap().is_empty());
    assert_eq!(pm.get_roles_for_user("bob", &[]).await.unwrap(), vec!["viewer"]);
    assert!(pm.get_permissions_for_user("editor").await.unwrap().is_empty());
    assert!(!pm.enforce("alice", "article", "publish").await.unwrap());
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let pm = manager();
    pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap();
    pm.add_permission_for_user("alice", "article", "edit").await.unwrap();

    assert!(pm.delete_user("alice").await.unwrap());
    assert!(pm.get_roles_for_user("alice", &["blog"]).await.unwrap().is_empty());
    assert!(!pm.has_permission_for_user("alice", "article", "edit").await.unwrap());
    assert!(!pm.delete_user("alice").await.unwrap());
}

#[tokio::test]
async fn test_role_membership_queries() {
    let pm = manager();
    pm.add_roles_for_user("alice", &["editor".to_string(), "viewer".to_string()], &["blog"])
        .await
        .unwrap();

    assert!(pm.has_role_for_user("alice", "viewer", &["blog"]).await.unwrap());
    assert!(!pm.has_role_for_user("alice", "viewer", &[]).await.unwrap());

    assert!(pm.delete_role_for_user("alice", "viewer", &["blog"]).await.unwrap());
    assert_eq!(pm.get_roles_for_user("alice", &["blog"]).await.unwrap(), vec!["editor"]);

    assert!(pm.delete_roles_for_user("alice", &["blog"]).await.unwrap());
    assert!(pm.get_roles_for_user("alice", &["blog"]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_policy_crud() {
    let pm = manager();
    assert!(
        pm.add_policies(vec![
            PolicyRule::new("editor", "article", "publish"),
            PolicyRule::new("editor", "article", "edit"),
            PolicyRule::new("viewer", "article", "read"),
        ])
        .await
        .unwrap()
    );
    assert!(pm.has_policy_for_user("editor", "article", "edit").await.unwrap());

    assert!(pm.delete_policy("editor", "article", "edit").await.unwrap());
    assert!(!pm.has_policy_for_user("editor", "article", "edit").await.unwrap());

    assert!(pm.delete_policies("editor").await.unwrap());
    assert_eq!(
        pm.get_policy().await.unwrap(),
        vec![PolicyRule::new("viewer", "article", "read")]
    );

    assert!(pm.delete_permission("article", "read").await.unwrap());
    assert!(pm.get_policy().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_permissions_for_user() {
    let pm = manager();
    assert!(
        pm.add_permissions_for_user("alice", &[("article", "edit"), ("article", "read")])
            .await
            .unwrap()
    );
    assert_eq!(
        pm.get_permissions_for_user("alice").await.unwrap(),
        vec![
            PolicyRule::new("alice", "article", "edit"),
            PolicyRule::new("alice", "article", "read"),
        ]
    );
}

#[tokio::test]
async fn test_implicit_queries() {
    let pm = manager();
    pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap();
    pm.add_role_for_user("editor", "writer", &["blog"]).await.unwrap();
    pm.add_role_for_user("bob", "writer", &[]).await.unwrap();
    pm.add_policy("writer", "article", "create").await.unwrap();
    pm.add_policy("editor", "article", "publish").await.unwrap();
    pm.add_permission_for_user("alice", "article", "create").await.unwrap();

    assert_eq!(
        pm.get_implicit_roles_for_user("alice", &["blog"]).await.unwrap(),
        vec!["editor", "writer"]
    );
    assert_eq!(
        pm.get_implicit_users_for_role("writer", &["blog"]).await.unwrap(),
        vec!["bob", "alice"]
    );
    assert_eq!(
        pm.get_implicit_permissions_for_user("alice", &["blog"]).await.unwrap(),
        vec![
            PolicyRule::new("writer", "article", "create"),
            PolicyRule::new("editor", "article", "publish"),
            PolicyRule::new("alice", "article", "create"),
        ]
    );
    assert_eq!(
        pm.get_implicit_resources_for_user("alice", &["blog"]).await.unwrap(),
        vec![
            PolicyRule::new("alice", "article", "create"),
            PolicyRule::new("alice", "article", "publish"),
        ]
    );
    assert_eq!(
        pm.get_implicit_users_for_permission("article", "create").await.unwrap(),
        vec!["alice", "bob"]
    );
    assert_eq!(pm.get_all_users_by_domain(&["blog"]).await.unwrap(), vec!["alice", "editor"]);
}

#[tokio::test]
async fn test_with_engine_rebinds() {
    let pm = manager();
    pm.add_policy("alice", "article", "read").await.unwrap();

    let rebound = pm.clone().with_engine(Arc::new(MemoryPolicyEngine::new()));
    assert_eq!(rebound.guard_name(), "larke");
    assert!(!rebound.enforce("alice", "article", "read").await.unwrap());
    assert!(pm.enforce("alice", "article", "read").await.unwrap());
}

#[tokio::test]
async fn test_users_by_multi_part_domain() {
    let pm = manager();
    pm.add_role_for_user("alice", "editor", &["tenant", "blog"]).await.unwrap();
    pm.add_role_for_user("bob", "editor", &["blog"]).await.unwrap();

    assert_eq!(
        pm.get_all_users_by_domain(&["tenant", "blog"]).await.unwrap(),
        vec!["alice"]
    );
    assert_eq!(pm.get_all_users_by_domain(&["blog"]).await.unwrap(), vec!["bob"]);
}

/// Engine whose storage is unreachable; implements only the required surface.
#[derive(Debug)]
struct OfflineEngine;

fn offline<T>() -> AppResult<T> {
    Err(AppError::policy_engine("offline"))
}

#[async_trait]
impl PolicyEngine for OfflineEngine {
    async fn add_role_for_user(&self, _: &str, _: &str, _: &DomainScope) -> AppResult<bool> {
        offline()
    }
    async fn add_roles_for_user(&self, _: &str, _: &[String], _: &DomainScope) -> AppResult<bool> {
        offline()
    }
    async fn has_role_for_user(&self, _: &str, _: &str, _: &DomainScope) -> AppResult<bool> {
        offline()
    }
    async fn get_roles_for_user(&self, _: &str, _: &DomainScope) -> AppResult<Vec<String>> {
        offline()
    }
    async fn get_users_for_role(&self, _: &str, _: &DomainScope) -> AppResult<Vec<String>> {
        offline()
    }
    async fn delete_role_for_user(&self, _: &str, _: &str, _: &DomainScope) -> AppResult<bool> {
        offline()
    }
    async fn delete_roles_for_user(&self, _: &str, _: &DomainScope) -> AppResult<bool> {
        offline()
    }
    async fn delete_user(&self, _: &str) -> AppResult<bool> {
        offline()
    }
    async fn delete_role(&self, _: &str) -> AppResult<bool> {
        offline()
    }
    async fn delete_permission(&self, _: &str, _: &str) -> AppResult<bool> {
        offline()
    }
    async fn add_policy(&self, _: PolicyRule) -> AppResult<bool> {
        offline()
    }
    async fn add_policies(&self, _: Vec<PolicyRule>) -> AppResult<bool> {
        offline()
    }
    async fn remove_policy(&self, _: &PolicyRule) -> AppResult<bool> {
        offline()
    }
    async fn remove_policies_for(&self, _: &str) -> AppResult<bool> {
        offline()
    }
    async fn has_policy(&self, _: &PolicyRule) -> AppResult<bool> {
        offline()
    }
    async fn get_policies_for(&self, _: &str) -> AppResult<Vec<PolicyRule>> {
        offline()
    }
    async fn get_implicit_roles_for_user(&self, _: &str, _: &DomainScope) -> AppResult<Vec<String>> {
        offline()
    }
    async fn get_implicit_users_for_role(&self, _: &str, _: &DomainScope) -> AppResult<Vec<String>> {
        offline()
    }
    async fn get_implicit_permissions_for_user(
        &self,
        _: &str,
        _: &DomainScope,
    ) -> AppResult<Vec<PolicyRule>> {
        offline()
    }
    async fn get_implicit_users_for_permission(&self, _: &str, _: &str) -> AppResult<Vec<String>> {
        offline()
    }
    async fn get_all_users_by_domain(&self, _: &DomainScope) -> AppResult<Vec<String>> {
        offline()
    }
    async fn enforce(&self, _: &str, _: &DomainScope, _: &str, _: &str) -> AppResult<bool> {
        offline()
    }
}

#[tokio::test]
async fn test_engine_errors_reach_the_caller_unchanged() {
    let pm = PermissionManager::new("larke", Arc::new(OfflineEngine));

    let err = pm.enforce("alice", "article", "publish").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PolicyEngine);
    assert_eq!(err.message, "offline");

    let err = pm.add_role_for_user("alice", "editor", &["blog"]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PolicyEngine);
    assert_eq!(err.message, "offline");

    let err = pm.get_implicit_resources_for_user("alice", &[]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PolicyEngine);
}

#[tokio::test]
async fn test_optional_features_default_to_not_implemented() {
    let pm = PermissionManager::new("larke", Arc::new(OfflineEngine));

    assert_eq!(pm.get_all_roles().await.unwrap_err().kind, ErrorKind::NotImplemented);
    assert_eq!(pm.get_all_subjects().await.unwrap_err().kind, ErrorKind::NotImplemented);
    assert_eq!(pm.get_all_domains().await.unwrap_err().kind, ErrorKind::NotImplemented);
    assert_eq!(pm.get_policy().await.unwrap_err().kind, ErrorKind::NotImplemented);
    assert_eq!(pm.get_role_links().await.unwrap_err().kind, ErrorKind::NotImplemented);
}
