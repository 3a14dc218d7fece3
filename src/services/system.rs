//! System service, presents health check

use failure::Error as FailureError;
use futures::future;

use models::HealthStatus;
use repos::ReposFactory;
use services::types::ServiceFuture;
use services::Service;

pub trait SystemService {
    /// Reports that the service is up
    fn healthcheck(&self) -> ServiceFuture<HealthStatus>;
}

impl<F: ReposFactory> SystemService for Service<F> {
    fn healthcheck(&self) -> ServiceFuture<HealthStatus> {
        Box::new(future::ok::<HealthStatus, FailureError>(HealthStatus { status: true }))
    }
}

#[cfg(test)]
mod tests {
    use futures::Future;

    use repos::repo_factory::tests::*;
    use services::*;

    #[test]
    fn test_healthcheck() {
        let service = create_service(None);
        let result = service.healthcheck().wait().unwrap();
        assert!(result.status);
    }
}
