use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use errors::Error;
use models::*;
use repos::types::RepoResult;

/// Shared in-process coupon storage keyed by code
pub type CouponsStorage = Arc<RwLock<HashMap<CouponCode, Coupon>>>;

pub fn new_coupons_storage() -> CouponsStorage {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Coupons repository, responsible for handling coupon
pub struct CouponsRepoImpl {
    pub storage: CouponsStorage,
}

pub trait CouponsRepo {
    /// Get coupon by code
    fn find_by_code(&self, code_arg: &CouponCode) -> RepoResult<Coupon>;

    /// Inserts coupon or replaces the one with the same code
    fn save(&self, payload: Coupon) -> RepoResult<()>;
}

impl CouponsRepoImpl {
    pub fn new(storage: CouponsStorage) -> Self {
        Self { storage }
    }
}

impl CouponsRepo for CouponsRepoImpl {
    /// Get coupon by code
    fn find_by_code(&self, code_arg: &CouponCode) -> RepoResult<Coupon> {
        debug!("Find in coupons with code: {}.", code_arg);
        let entries = self
            .storage
            .read()
            .map_err(|_| format_err!("coupons storage lock is poisoned").context(Error::Storage))?;

        match entries.get(code_arg) {
            Some(coupon) => Ok(coupon.clone()),
            None => Err(format_err!("coupon not found").context(Error::NotFound).into()),
        }
    }

    /// Inserts coupon or replaces the one with the same code
    fn save(&self, payload: Coupon) -> RepoResult<()> {
        debug!("Save coupon {:?}.", payload);
        let mut entries = self
            .storage
            .write()
            .map_err(|_| format_err!("coupons storage lock is poisoned").context(Error::Storage))?;

        entries.insert(payload.code.clone(), payload);
        Ok(())
    }
}
