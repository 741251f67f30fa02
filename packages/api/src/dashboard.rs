//! Landing-page summary.

use dioxus::prelude::*;
use model::DashboardOverview;

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};
#[cfg(feature = "server")]
use model::{Activity, DashboardStats, FileItem, Product, User};

/// Resource lists fetched when the stats endpoint fails.
#[cfg(feature = "server")]
pub struct FallbackLists {
    pub products: Result<Vec<Product>, ProxyError>,
    pub users: Result<Vec<User>, ProxyError>,
    pub files: Result<Vec<FileItem>, ProxyError>,
}

/// Whether the stats answer has to be replaced by counts derived from the
/// resource lists. A rejected token on either call ends the request instead.
#[cfg(feature = "server")]
pub fn needs_fallback(
    stats: &Result<DashboardStats, ProxyError>,
    activity: &Result<Vec<Activity>, ProxyError>,
) -> bool {
    match (stats, activity) {
        (Ok(_), _) => false,
        (Err(ProxyError::Unauthenticated), _) | (_, Err(ProxyError::Unauthenticated)) => false,
        (Err(_), _) => true,
    }
}

/// Combine the stats and activity answers into one overview.
///
/// Failed activity becomes an empty list. Failed stats are computed from
/// `fallback`; the product list is required there, users and files count as
/// empty when they fail. A 401 from any call is returned as is.
#[cfg(feature = "server")]
pub fn merge_overview(
    stats: Result<DashboardStats, ProxyError>,
    activity: Result<Vec<Activity>, ProxyError>,
    fallback: Option<FallbackLists>,
    threshold: i32,
) -> Result<DashboardOverview, ProxyError> {
    let activity = match activity {
        Ok(activity) => activity,
        Err(ProxyError::Unauthenticated) => return Err(ProxyError::Unauthenticated),
        Err(e) => {
            tracing::debug!(error = %e.detail(), "no recent activity available");
            Vec::new()
        }
    };

    let (stats, derived) = match stats {
        Ok(stats) => (stats, false),
        Err(ProxyError::Unauthenticated) => return Err(ProxyError::Unauthenticated),
        Err(e) => {
            let Some(lists) = fallback else {
                return Err(e);
            };
            tracing::debug!(error = %e.detail(), "deriving dashboard stats from lists");
            let products = lists.products?;
            let users = lenient(lists.users)?;
            let files = lenient(lists.files)?;
            (
                model::query::compute_stats(&products, &users, &files, threshold),
                true,
            )
        }
    };

    Ok(DashboardOverview {
        stats,
        activity,
        derived,
    })
}

#[cfg(feature = "server")]
fn lenient<T>(list: Result<Vec<T>, ProxyError>) -> Result<Vec<T>, ProxyError> {
    match list {
        Ok(list) => Ok(list),
        Err(ProxyError::Unauthenticated) => Err(ProxyError::Unauthenticated),
        Err(_) => Ok(Vec::new()),
    }
}

/// Stats and recent activity for the signed-in user.
///
/// When the backend stats endpoint is unavailable the counts are derived from
/// the product, user and file lists instead; missing activity is an empty list.
#[cfg(feature = "server")]
#[get("/api/dashboard", session: tower_sessions::Session)]
pub async fn dashboard_overview() -> Result<DashboardOverview, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let user_id = path_segment(&auth.user.id).map_err(ProxyError::into_server_fn)?;
    let token = Some(auth.token.as_str());

    let (stats, activity) = tokio::join!(
        client.get_data::<DashboardStats>(
            &format!("/dashboard/stats/{user_id}"),
            token,
            "Failed to fetch dashboard stats",
        ),
        client.get_data::<Vec<Activity>>(
            &format!("/dashboard/activity/{user_id}"),
            token,
            "Failed to fetch recent activity",
        ),
    );

    let fallback = if needs_fallback(&stats, &activity) {
        let (products, users, files) = tokio::join!(
            client.get_json::<Vec<Product>>("/products", token, "Failed to fetch products"),
            client.get_json::<Vec<User>>("/users", token, "Failed to fetch users"),
            client.get_json::<Vec<FileItem>>("/files", token, "Failed to fetch files"),
        );
        Some(FallbackLists {
            products,
            users,
            files,
        })
    } else {
        None
    };

    let threshold = crate::config::load()
        .map(|c| c.ui.low_stock_threshold)
        .unwrap_or(model::query::LOW_STOCK_THRESHOLD);
    merge_overview(stats, activity, fallback, threshold).map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/dashboard")]
pub async fn dashboard_overview() -> Result<DashboardOverview, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn unavailable() -> ProxyError {
        ProxyError::Backend {
            status: 503,
            message: "Service unavailable".into(),
        }
    }

    fn product(id: &str, quantity: i32) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            quantity,
            ..Default::default()
        }
    }

    fn activity() -> Vec<Activity> {
        vec![Activity {
            id: "a1".into(),
            kind: "PRODUCT_CREATED".into(),
            ..Default::default()
        }]
    }

    fn lists() -> FallbackLists {
        FallbackLists {
            products: Ok(vec![product("p1", 2), product("p2", 50), product("p3", 9)]),
            users: Ok(vec![User::default(), User::default()]),
            files: Ok(vec![FileItem::default()]),
        }
    }

    #[test]
    fn test_backend_stats_are_used_as_is() {
        let stats = DashboardStats {
            total_products: 12,
            product_growth: 4.5,
            ..Default::default()
        };
        let stats_result = Ok(stats.clone());
        let activity_result = Ok(activity());
        assert!(!needs_fallback(&stats_result, &activity_result));

        let overview = merge_overview(stats_result, activity_result, None, 10).unwrap();
        assert_eq!(overview.stats, stats);
        assert_eq!(overview.activity.len(), 1);
        assert!(!overview.derived);
    }

    #[test]
    fn test_failed_stats_are_derived_from_lists() {
        let stats_result = Err(unavailable());
        let activity_result = Ok(activity());
        assert!(needs_fallback(&stats_result, &activity_result));

        let overview = merge_overview(stats_result, activity_result, Some(lists()), 10).unwrap();
        assert!(overview.derived);
        assert_eq!(overview.stats.total_products, 3);
        assert_eq!(overview.stats.total_users, 2);
        assert_eq!(overview.stats.total_files, 1);
        assert_eq!(overview.stats.low_stock_products, 2);
        assert_eq!(overview.stats.product_growth, 0.0);
        assert_eq!(overview.activity.len(), 1);
    }

    #[test]
    fn test_failed_activity_is_empty() {
        let overview = merge_overview(
            Ok(DashboardStats::default()),
            Err(unavailable()),
            None,
            10,
        )
        .unwrap();
        assert!(overview.activity.is_empty());
        assert!(!overview.derived);
    }

    #[test]
    fn test_both_failing_still_answers() {
        let overview =
            merge_overview(Err(unavailable()), Err(unavailable()), Some(lists()), 10).unwrap();
        assert!(overview.derived);
        assert!(overview.activity.is_empty());
        assert_eq!(overview.stats.total_products, 3);
    }

    #[test]
    fn test_rejected_token_on_activity_propagates() {
        let stats_result = Ok(DashboardStats::default());
        let activity_result = Err(ProxyError::Unauthenticated);
        assert!(!needs_fallback(&stats_result, &activity_result));

        let err = merge_overview(stats_result, activity_result, None, 10).unwrap_err();
        assert!(matches!(err, ProxyError::Unauthenticated));
    }

    #[test]
    fn test_rejected_token_on_stats_propagates() {
        let stats_result = Err(ProxyError::Unauthenticated);
        let activity_result = Ok(activity());
        assert!(!needs_fallback(&stats_result, &activity_result));

        let err = merge_overview(stats_result, activity_result, None, 10).unwrap_err();
        assert_eq!(err.status(), 401);
    }

    #[test]
    fn test_fallback_needs_products() {
        let mut fallback = lists();
        fallback.products = Err(unavailable());
        let err = merge_overview(Err(unavailable()), Ok(activity()), Some(fallback), 10)
            .unwrap_err();
        assert_eq!(err.status(), 503);
    }

    #[test]
    fn test_fallback_tolerates_missing_users_and_files() {
        let mut fallback = lists();
        fallback.users = Err(unavailable());
        fallback.files = Err(ProxyError::Decode("bad json".into()));
        let overview =
            merge_overview(Err(unavailable()), Ok(Vec::new()), Some(fallback), 10).unwrap();
        assert_eq!(overview.stats.total_users, 0);
        assert_eq!(overview.stats.total_files, 0);
        assert_eq!(overview.stats.total_products, 3);
    }

    #[test]
    fn test_rejected_token_on_fallback_list_propagates() {
        let mut fallback = lists();
        fallback.users = Err(ProxyError::Unauthenticated);
        let err = merge_overview(Err(unavailable()), Ok(Vec::new()), Some(fallback), 10)
            .unwrap_err();
        assert!(matches!(err, ProxyError::Unauthenticated));
    }
}
