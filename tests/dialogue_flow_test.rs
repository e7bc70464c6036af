//! End-to-end flows through `ScoreBot::handle`
//!
//! Run with: cargo test --test dialogue_flow_test

mod common;

use common::fixtures::bodies;
use common::TestEnvironment;
use examscore_bot::core::types::{MenuLayout, CALLBACK_LOGIN, CALLBACK_START_REGISTRATION};
use examscore_bot::dialogue::Step;
use examscore_bot::i18n;
use examscore_bot::registration::is_registered;
use examscore_bot::storage::db;
use examscore_bot::Reply;
use pretty_assertions::assert_eq;

// ============================================================================
// Registration
// ============================================================================

mod registration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_then_register_via_button() {
        let env = TestEnvironment::new();

        let replies = env.send_text(1, "/start");
        assert!(matches!(
            replies.as_slice(),
            [Reply::Text { keyboard: Some(MenuLayout::RegisterOrLogin), .. }]
        ));

        let replies = env.press(1, CALLBACK_START_REGISTRATION);
        assert_eq!(
            replies,
            vec![Reply::DeleteOrigin, Reply::text(i18n::t("ask-first-name"))]
        );

        env.send_text(1, "Анна");
        let replies = env.send_text(1, "Иванова");

        assert_eq!(
            replies,
            vec![
                Reply::text(i18n::t("flow-completed")),
                Reply::Photo {
                    path: env.photo_path.clone(),
                    caption: i18n::t_name("login-greeting", "User1"),
                },
            ]
        );
        assert_eq!(env.bot.conversations().step(1), Step::Idle);

        let profile = db::get_profile(&env.conn(), 1).unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].first_name, "Анна");
        assert_eq!(profile[0].last_name, "Иванова");
    }

    #[test]
    fn test_registration_is_permanent() {
        let env = TestEnvironment::new();
        assert!(!is_registered(&env.conn(), 42).unwrap());

        env.register(42, "Anna", "Ivanova");
        assert!(is_registered(&env.conn(), 42).unwrap());

        // second attempt by command: one rejection, echo stays silent
        let replies = env.send_text(42, "/register");
        assert_eq!(replies, vec![Reply::text(i18n::t("already-registered"))]);
        assert_eq!(env.bot.conversations().step(42), Step::Idle);

        // and by button
        let replies = env.press(42, CALLBACK_START_REGISTRATION);
        assert_eq!(replies, vec![Reply::text(i18n::t("already-registered"))]);
        assert_eq!(env.bot.conversations().step(42), Step::Idle);

        assert_eq!(db::get_profile(&env.conn(), 42).unwrap().len(), 1);
        assert!(db::get_logged_messages(&env.conn(), 42).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_names_keep_step() {
        let env = TestEnvironment::new();
        env.send_text(2, "/register");

        let replies = env.send_text(2, "Anna Maria");
        assert_eq!(bodies(&replies), vec![i18n::t("invalid-first-name")]);
        assert_eq!(env.bot.conversations().step(2), Step::AwaitingFirstName);

        env.send_text(2, "Anna");
        let replies = env.send_text(2, "Ivanova-Petrova");
        assert_eq!(bodies(&replies), vec![i18n::t("invalid-last-name")]);
        assert_eq!(env.bot.conversations().step(2), Step::AwaitingLastName);
        assert!(!is_registered(&env.conn(), 2).unwrap());
    }

    #[test]
    fn test_name_with_quote_is_rejected_but_storage_accepts_it() {
        let env = TestEnvironment::new();
        env.send_text(3, "/register");
        env.send_text(3, "O'Neil");
        assert_eq!(env.bot.conversations().step(3), Step::AwaitingFirstName);

        db::create_profile(&env.conn(), 3, "O'Neil", "D'Arcy").unwrap();
        let profile = db::get_profile(&env.conn(), 3).unwrap();
        assert_eq!(profile[0].first_name, "O'Neil");
        assert_eq!(profile[0].last_name, "D'Arcy");
    }
}

// ============================================================================
// Score entry
// ============================================================================

mod score_entry_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enter_and_view_scores() {
        let env = TestEnvironment::new();
        env.register(7, "Anna", "Ivanova");

        let replies = env.send_text(7, "/enter_scores");
        assert_eq!(replies, vec![Reply::DeleteOrigin, Reply::text(i18n::t("ask-subject"))]);

        let replies = env.send_text(7, "Math");
        assert_eq!(bodies(&replies), vec![i18n::t("ask-points")]);

        let replies = env.send_text(7, "87");
        assert_eq!(replies[0], Reply::text(i18n::t("flow-completed")));
        assert!(matches!(replies[1], Reply::Photo { .. }));

        let scores = db::get_subject_scores(&env.conn(), 7).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!((scores[0].user_id, scores[0].subject_name.as_str(), scores[0].points), (7, "Math", 87));

        let replies = env.send_text(7, "/view_scores");
        assert_eq!(
            replies,
            vec![Reply::DeleteOrigin, Reply::text("Баллы по предмету Math - 87")]
        );
    }

    #[test]
    fn test_invalid_subject_stays_put() {
        let env = TestEnvironment::new();
        env.send_text(7, "/enter_scores");

        let replies = env.send_text(7, "Math2");

        assert_eq!(replies, vec![Reply::text(i18n::t("invalid-subject"))]);
        assert_eq!(env.bot.conversations().step(7), Step::AwaitingSubjectName);
        assert!(db::get_subject_scores(&env.conn(), 7).unwrap().is_empty());
    }

    #[test]
    fn test_points_boundaries() {
        let env = TestEnvironment::new();

        for (input, accepted) in [("0", true), ("100", true), ("101", false), ("-1", false), ("99.5", false)] {
            env.send_text(8, "/enter_scores");
            env.send_text(8, "Physics");
            env.send_text(8, input);

            let step = env.bot.conversations().step(8);
            assert_eq!(step.is_idle(), accepted, "input {:?}", input);
            if !accepted {
                env.send_text(8, "/cancel");
            }
        }

        let points: Vec<u8> = db::get_subject_scores(&env.conn(), 8)
            .unwrap()
            .into_iter()
            .map(|score| score.points)
            .collect();
        assert_eq!(points, vec![0, 100]);
    }

    #[test]
    fn test_score_entry_does_not_require_registration() {
        let env = TestEnvironment::new();
        env.send_text(9, "/enter_scores");
        env.send_text(9, "History");
        let replies = env.send_text(9, "55");

        // the closing login screen offers registration instead of the photo
        assert_eq!(
            replies[1],
            Reply::with_keyboard(i18n::t_name("login-not-registered", "User9"), MenuLayout::RegisterOnly)
        );
        assert_eq!(db::get_subject_scores(&env.conn(), 9).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_scores_are_kept() {
        let env = TestEnvironment::new();
        for points in ["70", "75"] {
            env.send_text(10, "/enter_scores");
            env.send_text(10, "Math");
            env.send_text(10, points);
        }

        let replies = env.send_text(10, "/view_scores");
        assert_eq!(
            bodies(&replies),
            vec!["Баллы по предмету Math - 70", "Баллы по предмету Math - 75"]
        );
    }

    #[test]
    fn test_view_scores_when_empty() {
        let env = TestEnvironment::new();
        let replies = env.send_text(11, "/view_scores");
        assert_eq!(bodies(&replies), vec![i18n::t_name("scores-empty", "User11")]);
    }
}

// ============================================================================
// Login, cancel and fallback
// ============================================================================

mod menu_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unregistered_login() {
        let env = TestEnvironment::new();

        let replies = env.press(9, CALLBACK_LOGIN);

        assert_eq!(
            replies,
            vec![Reply::with_keyboard(
                i18n::t_name("login-not-registered", "User9"),
                MenuLayout::RegisterOnly
            )]
        );
        assert!(!is_registered(&env.conn(), 9).unwrap());
    }

    #[test]
    fn test_registered_login_without_photo() {
        let env = TestEnvironment::without_photo();
        env.register(12, "Anna", "Ivanova");

        let replies = env.press(12, CALLBACK_LOGIN);

        assert_eq!(
            replies,
            vec![
                Reply::DeleteOrigin,
                Reply::text(i18n::t_name("login-greeting", "User12")),
            ]
        );
    }

    #[test]
    fn test_cancel_everywhere() {
        let env = TestEnvironment::new();
        let cancelled = vec![Reply::text(i18n::t("flow-cancelled"))];

        let steps: [&[&str]; 4] = [
            &["/register"],
            &["/register", "Anna"],
            &["/enter_scores"],
            &["/enter_scores", "Math"],
        ];
        for inputs in steps {
            for input in inputs {
                env.send_text(13, input);
            }
            assert!(!env.bot.conversations().step(13).is_idle());

            assert_eq!(env.send_text(13, "/cancel"), cancelled);
            assert!(env.bot.conversations().conversation(13).is_none());
        }

        assert!(!is_registered(&env.conn(), 13).unwrap());
        assert!(db::get_subject_scores(&env.conn(), 13).unwrap().is_empty());
    }

    #[test]
    fn test_free_text_and_idle_cancel_are_logged() {
        let env = TestEnvironment::new();

        assert_eq!(env.send_text(14, "hello"), vec![Reply::text(i18n::t("echo"))]);
        assert_eq!(env.send_text(14, "/cancel"), vec![Reply::text(i18n::t("echo"))]);

        let logged = db::get_logged_messages(&env.conn(), 14).unwrap();
        let texts: Vec<&str> = logged.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "/cancel"]);
        assert!(logged.iter().all(|m| m.day == db::today()));
    }

    #[test]
    fn test_help_is_static() {
        let env = TestEnvironment::new();
        assert_eq!(env.send_text(15, "/help"), vec![Reply::text(i18n::t("help"))]);
        assert_eq!(env.send_text(16, "/help@exam_score_bot"), vec![Reply::text(i18n::t("help"))]);
    }
}
