use super::*;

#[test]
fn view_paths_round_trip() {
    for view in View::ALL {
        assert_eq!(View::from_path(view.path()), Some(view));
    }
    assert_eq!(View::from_path("/nope"), None);
}

#[test]
fn navigate_updates_current_and_history() {
    let router = Router::new(View::Home);
    router.navigate(View::Operations);
    router.navigate(View::Profile);
    assert_eq!(router.current(), View::Profile);
    assert_eq!(router.history(), vec![View::Operations, View::Profile]);
}

#[test]
fn unauthorized_redirects_to_login_once() {
    let router = Router::new(View::Operations);
    assert!(router.unauthorized());
    assert!(!router.unauthorized());
    assert_eq!(router.current(), View::Login);
    assert_eq!(router.history(), vec![View::Login]);
}

#[test]
fn unauthorized_on_login_view_does_not_navigate() {
    let router = Router::new(View::Login);
    assert!(!router.unauthorized());
    assert!(router.history().is_empty());
}

#[test]
fn unauthorized_from_many_threads_navigates_once() {
    let router = std::sync::Arc::new(Router::new(View::ViewExpressions));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = router.clone();
            std::thread::spawn(move || router.unauthorized())
        })
        .collect();
    let redirects = handles.into_iter().map(|h| h.join().unwrap()).filter(|did| *did).count();
    assert_eq!(redirects, 1);
    assert_eq!(router.history(), vec![View::Login]);
}
