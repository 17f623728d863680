//! Per-request facts shared by all handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use chrono::{NaiveDate, Utc};
use turbo_commerce::catalog::Viewer;
use turbo_commerce::pricing::LocalCurrency;
use turbo_commerce::{Currency, ExchangeRates};

/// Cookie holding the shopper's preferred display currency.
pub const CURRENCY_COOKIE: &str = "currency";

const REQUESTED_WITH: &str = "x-requested-with";

/// Who is asking, how, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Inserted into request extensions by the authentication layer.
    /// Missing means anonymous.
    pub viewer: Viewer,
    /// Request came from client-side script expecting JSON.
    pub is_ajax: bool,
    /// Preferred display currency, if any.
    pub currency: Option<Currency>,
    pub today: NaiveDate,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            viewer: parts.extensions.get::<Viewer>().copied().unwrap_or_default(),
            is_ajax: is_ajax(&parts.headers),
            currency: CookieJar::from_headers(&parts.headers)
                .get(CURRENCY_COOKIE)
                .and_then(|cookie| Currency::from_code(cookie.value().trim())),
            today: Utc::now().date_naive(),
        }
    }

    /// Conversion into the preferred currency, when one was requested.
    pub fn local_currency<'a>(&self, rates: &'a ExchangeRates) -> Option<LocalCurrency<'a>> {
        self.currency.map(|currency| LocalCurrency::new(currency, rates))
    }
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use turbo_commerce::UserId;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_defaults_to_anonymous_html_request() {
        let ctx = RequestContext::from_parts(&parts(Request::builder().uri("/").body(()).unwrap()));
        assert_eq!(ctx.viewer, Viewer::Anonymous);
        assert!(!ctx.is_ajax);
        assert_eq!(ctx.currency, None);
    }

    #[test]
    fn test_reads_viewer_ajax_and_currency() {
        let mut request = Request::builder()
            .uri("/")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Cookie", "currency=EUR; other=1")
            .body(())
            .unwrap();
        request.extensions_mut().insert(Viewer::Staff(UserId::new(3)));

        let ctx = RequestContext::from_parts(&parts(request));
        assert_eq!(ctx.viewer, Viewer::Staff(UserId::new(3)));
        assert!(ctx.is_ajax);
        assert_eq!(ctx.currency, Some(Currency::EUR));
    }

    #[test]
    fn test_unknown_currency_is_ignored() {
        let request = Request::builder()
            .uri("/")
            .header("Cookie", "currency=XYZ")
            .body(())
            .unwrap();
        assert_eq!(RequestContext::from_parts(&parts(request)).currency, None);
    }
}
