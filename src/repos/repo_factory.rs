use repos::*;

pub trait ReposFactory: Clone + Send + 'static {
    fn create_coupons_repo(&self) -> Box<CouponsRepo>;
    fn create_rate_limits_repo(&self) -> Box<RateLimitsRepo>;
}

#[derive(Clone)]
pub struct ReposFactoryImpl {
    coupons_storage: CouponsStorage,
    rate_limits: RateLimitsBackend,
}

impl ReposFactoryImpl {
    pub fn new(coupons_storage: CouponsStorage, rate_limits: RateLimitsBackend) -> Self {
        Self {
            coupons_storage,
            rate_limits,
        }
    }
}

impl ReposFactory for ReposFactoryImpl {
    fn create_coupons_repo(&self) -> Box<CouponsRepo> {
        Box::new(CouponsRepoImpl::new(self.coupons_storage.clone())) as Box<CouponsRepo>
    }

    fn create_rate_limits_repo(&self) -> Box<RateLimitsRepo> {
        match self.rate_limits {
            RateLimitsBackend::Memory(ref storage) => Box::new(RateLimitsRepoMemory::new(storage.clone())) as Box<RateLimitsRepo>,
            RateLimitsBackend::Redis(ref pool) => Box::new(RateLimitsRepoRedis::new(pool.clone())) as Box<RateLimitsRepo>,
        }
    }
}
