use common::Role;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use crate::common::{TestApp, member, routes, team_payload};
use server::entity::{team_member, user};

/// Register two teams: TID-A "Alpha Squad" (Theme 1) and TID-B "Beta Bytes" (Theme 2).
async fn seed_two_teams(app: &TestApp) {
    app.register_team(&team_payload(
        "TID-A",
        "Alpha Squad",
        "Theme 1",
        vec![member("Alice", 1, "female"), member("Bob", 2, "male")],
    ))
    .await;
    app.register_team(&team_payload(
        "TID-B",
        "Beta Bytes",
        "Theme 2",
        vec![
            member("Carol", 3, "female"),
            member("Dan", 4, "male"),
            member("Erin", 5, "female"),
        ],
    ))
    .await;
}

mod list {
    use super::*;

    #[tokio::test]
    async fn returns_all_teams_with_members() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app.get_with_session(routes::TEAMS, &session).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let teams = res.body.as_array().unwrap();
        assert_eq!(teams.len(), 2);
        let beta = teams.iter().find(|t| t["team_id"] == "TID-B").unwrap();
        assert_eq!(beta["members"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_matches_name_or_id_case_insensitively() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let by_name = app
            .get_query_with_session(routes::TEAMS, &[("search", "ALPHA")], &session)
            .await;
        let by_id = app
            .get_query_with_session(routes::TEAMS, &[("search", "tid-b")], &session)
            .await;

        assert_eq!(by_name.body.as_array().unwrap().len(), 1);
        assert_eq!(by_name.body[0]["team_id"], "TID-A");
        assert_eq!(by_id.body.as_array().unwrap().len(), 1);
        assert_eq!(by_id.body[0]["team_name"], "Beta Bytes");
    }

    #[tokio::test]
    async fn search_without_match_returns_empty_array() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app
            .get_query_with_session(routes::TEAMS, &[("search", "zzz")], &session)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn wildcards_in_search_are_literal() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app
            .get_query_with_session(routes::TEAMS, &[("search", "%")], &session)
            .await;

        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn theme_filter_is_exact() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app
            .get_query_with_session(routes::TEAMS, &[("theme", "Theme 2")], &session)
            .await;
        let unknown = app
            .get_query_with_session(routes::TEAMS, &[("theme", "Theme 7")], &session)
            .await;

        assert_eq!(res.body.as_array().unwrap().len(), 1);
        assert_eq!(res.body[0]["team_id"], "TID-B");
        assert_eq!(unknown.status, 400);
        assert_eq!(unknown.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn requires_admin_session() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::TEAMS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "SESSION_MISSING");
    }
}

mod get {
    use super::*;

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let session = app.login_admin().await;

        let res = app.get_with_session(&routes::team("TID-NOPE"), &session).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["error"], "Team not found");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn submissions_can_be_set_and_cleared() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let set = app
            .patch_with_session(
                &routes::team("TID-A"),
                &json!({
                    "abstract_submission": "https://drive.example.com/abstract.pdf",
                    "team_name": "Alpha Prime",
                }),
                &session,
            )
            .await;
        assert_eq!(set.status, 200, "{}", set.text);
        assert_eq!(set.body["abstract_submission"], "https://drive.example.com/abstract.pdf");
        assert_eq!(set.body["team_name"], "Alpha Prime");
        assert_eq!(set.body["members"].as_array().unwrap().len(), 2);

        let cleared = app
            .patch_with_session(
                &routes::team("TID-A"),
                &json!({"abstract_submission": null}),
                &session,
            )
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["abstract_submission"].is_null());
        assert_eq!(cleared.body["team_name"], "Alpha Prime");
    }

    #[tokio::test]
    async fn empty_patch_returns_team_unchanged() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app
            .patch_with_session(&routes::team("TID-B"), &json!({}), &session)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["team_name"], "Beta Bytes");
        assert_eq!(res.body["theme"], "Theme 2");
    }

    #[tokio::test]
    async fn roster_fields_are_rejected() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app
            .patch_with_session(&routes::team("TID-A"), &json!({"num_teammates": 4}), &session)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let session = app.login_admin().await;

        let res = app
            .patch_with_session(&routes::team("TID-X"), &json!({"team_name": "X"}), &session)
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_team_and_only_its_participants() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;

        let res = app.delete_with_session(&routes::team("TID-A"), &session).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body["message"],
            "Team and associated participants successfully deleted"
        );
        assert_eq!(res.body["deletedTeam"]["team_id"], "TID-A");
        assert_eq!(res.body["deletedParticipants"], 2);

        let gone = app.get_with_session(&routes::team("TID-A"), &session).await;
        assert_eq!(gone.status, 404);

        let remaining = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Participant))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(remaining, 3);
        let links = team_member::Entity::find()
            .filter(team_member::Column::TeamId.eq("TID-A"))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(links, 0);

        let other = app.get_with_session(&routes::team("TID-B"), &session).await;
        assert_eq!(other.body["members"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn deleted_members_can_register_again() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;
        let session = app.login_admin().await;
        app.delete_with_session(&routes::team("TID-A"), &session).await;

        app.register_team(&team_payload(
            "TID-C",
            "Comeback",
            "Theme 4",
            vec![member("Alice", 1, "female"), member("Bob", 2, "male")],
        ))
        .await;
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let session = app.login_admin().await;

        let res = app.delete_with_session(&routes::team("TID-NOPE"), &session).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn requires_admin_session() {
        let app = TestApp::spawn().await;
        seed_two_teams(&app).await;

        let res = app.delete(&routes::team("TID-A")).await;

        assert_eq!(res.status, 401);
        let still_there = app.login_admin().await;
        let team = app.get_with_session(&routes::team("TID-A"), &still_there).await;
        assert_eq!(team.status, 200);
    }
}
