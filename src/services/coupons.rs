//! Coupons Services, presents applying, creating and fetching coupons

use failure::Error as FailureError;
use futures::future;

use errors::Error;
use models::*;
use repos::ReposFactory;
use services::types::ServiceFuture;
use services::Service;

pub trait CouponsService {
    /// Applies coupon with `code` to the basket and returns the updated basket
    fn apply_coupon(&self, basket: Basket, code: CouponCode) -> ServiceFuture<Basket>;
    /// Creates new coupon
    fn create_coupon(&self, discount: i32, code: CouponCode, min_basket_value: f64) -> ServiceFuture<()>;
    /// Returns coupons by codes, in the order the codes were given
    fn get_coupons(&self, codes: Vec<CouponCode>) -> ServiceFuture<Vec<Coupon>>;
}

fn empty_code_error<T: 'static>() -> ServiceFuture<T> {
    let err: FailureError = format_err!("empty coupon code").context(Error::InvalidInput).into();
    Box::new(future::err(err))
}

impl<F: ReposFactory> CouponsService for Service<F> {
    /// Applies coupon with `code` to the basket and returns the updated basket
    fn apply_coupon(&self, basket: Basket, code: CouponCode) -> ServiceFuture<Basket> {
        if code.is_empty() {
            return empty_code_error();
        }

        let user_id = self.dynamic_context.user_id.clone();
        let repo_factory = self.static_context.repo_factory.clone();

        self.spawn_on_pool(move || {
            debug!("User {:?} applies coupon {} to basket {:?}.", user_id, code, basket);
            let coupons_repo = repo_factory.create_coupons_repo();

            let coupon = coupons_repo.find_by_code(&code)?;

            if !(basket.value > 0.0) {
                return Err(format_err!("invalid basket value").context(Error::InvalidInput).into());
            }

            // min_basket_value is not checked here and value is left as is
            let mut basket = basket;
            basket.applied_discount = coupon.discount;
            basket.application_successful = true;
            basket.coupon_code = code;

            Ok(basket)
        })
    }

    /// Creates new coupon
    fn create_coupon(&self, discount: i32, code: CouponCode, min_basket_value: f64) -> ServiceFuture<()> {
        if code.is_empty() {
            return empty_code_error();
        }

        let user_id = self.dynamic_context.user_id.clone();
        let repo_factory = self.static_context.repo_factory.clone();

        self.spawn_on_pool(move || {
            let coupons_repo = repo_factory.create_coupons_repo();
            let coupon = Coupon {
                id: CouponId::new(),
                code,
                discount,
                min_basket_value,
            };
            debug!("User {:?} creates coupon {} with code {}.", user_id, coupon.id, coupon.code);

            coupons_repo.save(coupon)
        })
    }

    /// Returns coupons by codes, in the order the codes were given
    fn get_coupons(&self, codes: Vec<CouponCode>) -> ServiceFuture<Vec<Coupon>> {
        if codes.is_empty() {
            return Box::new(future::ok::<Vec<Coupon>, FailureError>(vec![]));
        }

        let user_id = self.dynamic_context.user_id.clone();
        let repo_factory = self.static_context.repo_factory.clone();

        self.spawn_on_pool(move || {
            debug!("User {:?} requests coupons {:?}.", user_id, codes);
            let coupons_repo = repo_factory.create_coupons_repo();

            let mut coupons = Vec::with_capacity(codes.len());
            for code in codes {
                let coupon = coupons_repo
                    .find_by_code(&code)
                    .map_err(|e| e.context(format!("error finding coupon {}", code)))?;
                coupons.push(coupon);
            }

            Ok(coupons)
        })
    }
}
