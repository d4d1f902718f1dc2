//! Concurrent installation of the process-wide default context.
//!
//! Lives in its own binary so that nothing else installs a default first.

use std::sync::Barrier;
use std::thread;

use billing_api::{
    default_context, init_default_context, AccessToken, ApiContext, ConfigError, EndpointUrl,
};

const RACERS: usize = 16;

#[test]
fn test_racing_initializers_install_exactly_one_context() {
    let barrier = Barrier::new(RACERS);

    let results: Vec<(String, Result<(), ConfigError>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..RACERS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    let token = format!("token-{i}");
                    let context = ApiContext::builder()
                        .access_token(AccessToken::new(token.clone()).unwrap())
                        .endpoint(EndpointUrl::new("https://race.test.local").unwrap())
                        .build()
                        .unwrap();
                    barrier.wait();
                    (token, init_default_context(context))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let winners: Vec<&String> = results
        .iter()
        .filter(|(_, result)| result.is_ok())
        .map(|(token, _)| token)
        .collect();
    assert_eq!(winners.len(), 1);

    for (_, result) in results.iter().filter(|(_, result)| result.is_err()) {
        assert_eq!(result, &Err(ConfigError::DefaultContextAlreadyInitialized));
    }

    let installed = default_context().unwrap();
    assert_eq!(
        installed.credentials().authorization_header(),
        format!("Bearer {}", winners[0])
    );
}
