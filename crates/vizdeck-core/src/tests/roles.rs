use crate::*;
use serde_json::json;

#[test]
fn roles_order_by_precedence() {
    assert!(Role::Admin > Role::Developer);
    assert!(Role::Developer > Role::Editor);
    assert!(Role::Editor > Role::Tester);
    assert!(Role::Tester > Role::Viewer);
}

#[test]
fn higher_roles_grant_lower_requirements() {
    assert!(role_allows(Role::Admin, Role::Viewer, None));
    assert!(role_allows(Role::Editor, Role::Editor, None));
    assert!(!role_allows(Role::Tester, Role::Editor, None));
}

#[test]
fn show_as_replaces_the_effective_role() {
    // an admin previewing the viewer UI loses editor access
    assert!(!role_allows(Role::Admin, Role::Editor, Some(Role::Viewer)));
    // and show-as also works upward, mirroring the dashboard
    assert!(role_allows(Role::Viewer, Role::Admin, Some(Role::Admin)));
}

#[test]
fn role_names_round_trip() {
    for role in [
        Role::Viewer,
        Role::Tester,
        Role::Editor,
        Role::Developer,
        Role::Admin,
    ] {
        assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
    }
    assert!(matches!(
        "superuser".parse::<Role>(),
        Err(Error::UnknownRole(_))
    ));
}

#[test]
fn user_without_group_is_allowed_nothing() {
    let user: User = serde_json::from_value(json!({"Username": "jo"})).unwrap();

    assert!(!user.allows(Role::Viewer, None));
    assert!(user.allows(Role::Viewer, Some(Role::Viewer)));
}

#[test]
fn user_deserializes_the_provider_wire_shape() {
    let user: User = serde_json::from_value(json!({
        "Username": "jo",
        "Enabled": true,
        "UserStatus": "CONFIRMED",
        "Attributes": [
            {"Name": "email", "Value": "jo@example.org"},
            {"Name": "name", "Value": "Jo"}
        ],
        "group": "developer",
        "editorAccess": ["t-1"]
    }))
    .unwrap();

    assert!(user.enabled);
    assert_eq!(user.group, Some(Role::Developer));
    assert_eq!(user.editor_access, vec!["t-1".to_string()]);
    assert!(user.allows(Role::Editor, None));
}

#[test]
fn attributes_map_first_occurrence_wins() {
    let user: User = serde_json::from_value(json!({
        "Username": "jo",
        "Attributes": [
            {"Name": "locale", "Value": "en"},
            {"Name": "locale", "Value": "de"}
        ]
    }))
    .unwrap();

    assert_eq!(user.attributes_map()["locale"], "en");
}

#[test]
fn display_name_prefers_name_then_email_then_username() {
    let named: User = serde_json::from_value(json!({
        "Username": "jo",
        "Attributes": [
            {"Name": "email", "Value": "jo@example.org"},
            {"Name": "name", "Value": "Jo"}
        ]
    }))
    .unwrap();
    assert_eq!(named.display_name(), "Jo");

    let email_only: User = serde_json::from_value(json!({
        "Username": "jo",
        "Attributes": [{"Name": "email", "Value": "jo@example.org"}]
    }))
    .unwrap();
    assert_eq!(email_only.display_name(), "jo@example.org");

    let bare: User = serde_json::from_value(json!({"Username": "jo"})).unwrap();
    assert_eq!(bare.display_name(), "jo");
}
