use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};
use serde_json::Value;

use crate::config::{fields, ClientConfig, Endpoints};
use crate::error::{AppError, Result};
use crate::fetch::decode::take_key;
use crate::fetch::{
    build_batch_params, render_template, EventStream, HttpTransport, ParamValue, QueryParams,
    Transport,
};
use crate::normalize;
use crate::records::{Normalized, Record, Series, Table};

pub mod market;
pub mod products;

pub use market::{MarketSeries, COMMODITIES, ECONOMIC_DATA};
pub use products::{Product, ALL_PRODUCTS, BASE_PRODUCTS};

const QUOTE_STREAM: &str = "stocksUSNoUTP";
const NEWS_STREAM: &str = "news-stream";

/// Client for the provider's batch, market data-point and streaming endpoints.
///
/// Calls are synchronous and the transport is reused between them.
pub struct IexClient<T: Transport = HttpTransport> {
    symbol: Option<String>,
    token: String,
    endpoints: Endpoints,
    transport: T,
}

impl IexClient<HttpTransport> {
    /// Build a client over HTTP. Fails when the configuration carries no token.
    pub fn new(symbol: Option<&str>, config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(
            symbol,
            config.token.as_deref(),
            config.endpoints.clone(),
            transport,
        )
    }
}

impl<T: Transport> IexClient<T> {
    pub fn with_transport(
        symbol: Option<&str>,
        token: Option<&str>,
        endpoints: Endpoints,
        transport: T,
    ) -> Result<Self> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::MissingToken)?
            .to_string();

        let symbol = symbol
            .map(|symbol| symbol.trim().to_uppercase())
            .filter(|symbol| !symbol.is_empty());

        Ok(Self {
            symbol,
            token,
            endpoints,
            transport,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    fn require_symbol(&self) -> Result<&str> {
        self.symbol.as_deref().ok_or(AppError::MissingSymbol)
    }

    /// Query parameters for a batch request of `endpoint`.
    pub fn params(&self, endpoint: &str, optional: &QueryParams) -> Result<Vec<(String, String)>> {
        let symbol = self.require_symbol()?;
        Ok(build_batch_params(symbol, endpoint, &self.token, optional))
    }

    /// Fetch one endpoint from the batch URL and return `response[symbol][endpoint]`.
    pub fn fetch(&self, endpoint: &str, optional: &QueryParams) -> Result<Value> {
        let query = self.params(endpoint, optional)?;
        let symbol = self.require_symbol()?;
        debug!("fetching `{}` for {}", endpoint, symbol);

        let body = self.transport.get_json(&self.endpoints.batch, &query)?;
        let by_symbol = take_key(body, symbol, "response")?;
        take_key(by_symbol, endpoint, &format!("response.{symbol}"))
    }

    /// Fetch a market data-point series verbatim.
    pub fn fetch_market(&self, series: &str) -> Result<Value> {
        let replacements = HashMap::from([("series", series)]);
        let url = render_template(&self.endpoints.market, &replacements)?;
        debug!("fetching market series {}", series);

        let query = [("token".to_string(), self.token.clone())];
        self.transport.get_json(&url, &query)
    }

    /// Open a server-sent-event stream for `endpoint`. Events are not normalized.
    pub fn stream(&self, endpoint: &str) -> Result<EventStream> {
        let symbol = self.require_symbol()?;
        let replacements = HashMap::from([
            ("endpoint", endpoint),
            ("token", self.token.as_str()),
            ("symbol", symbol),
        ]);
        let url = render_template(&self.endpoints.stream, &replacements)?;
        self.transport.open_stream(&url)
    }

    pub fn quote_stream(&self) -> Result<EventStream> {
        self.stream(QUOTE_STREAM)
    }

    pub fn news_stream(&self) -> Result<EventStream> {
        self.stream(NEWS_STREAM)
    }

    // Batch products.

    pub fn key_stats(&self, params: &QueryParams) -> Result<Record> {
        normalize::key_stats(self.fetch(Product::KeyStats.endpoint(), params)?)
    }

    pub fn advanced_stats(&self, params: &QueryParams) -> Result<Record> {
        normalize::advanced_stats(self.fetch(Product::AdvancedStats.endpoint(), params)?)
    }

    pub fn balance_sheet(&self, params: &QueryParams) -> Result<Table> {
        let raw = self.statement(Product::BalanceSheet, "balancesheet", params)?;
        normalize::filtered_table(raw, fields::BALANCE_SHEET, "balancesheet")
    }

    pub fn cash_flow(&self, params: &QueryParams) -> Result<Table> {
        let raw = self.statement(Product::CashFlow, "cashflow", params)?;
        normalize::filtered_table(raw, fields::CASH_FLOW, "cashflow")
    }

    pub fn earnings(&self, params: &QueryParams) -> Result<Table> {
        normalize::earnings(self.statement(Product::Earnings, "earnings", params)?)
    }

    pub fn financials(&self, params: &QueryParams) -> Result<Table> {
        let raw = self.statement(Product::Financials, "financials", params)?;
        normalize::filtered_table(raw, fields::FINANCIALS, "financials")
    }

    pub fn income_statement(&self, params: &QueryParams) -> Result<Table> {
        let raw = self.statement(Product::IncomeStatement, "income", params)?;
        normalize::filtered_table(raw, fields::INCOME_STATEMENT, "income")
    }

    pub fn company(&self, params: &QueryParams) -> Result<Record> {
        normalize::company(self.fetch(Product::Company.endpoint(), params)?)
    }

    pub fn dividends(&self, params: &QueryParams) -> Result<Table> {
        normalize::dividends(self.fetch(Product::Dividends.endpoint(), params)?)
    }

    pub fn estimates(&self) -> Result<Value> {
        let raw = self.statement(Product::Estimates, "estimates", &QueryParams::new())?;
        normalize::estimates(raw)
    }

    pub fn fund_ownership(&self) -> Result<Table> {
        normalize::fund_ownership(self.fetch_plain(Product::FundOwnership)?)
    }

    pub fn insider_roster(&self) -> Result<Table> {
        normalize::open_table(self.fetch_plain(Product::InsiderRoster)?, "insider-roster")
    }

    pub fn insider_summary(&self) -> Result<Table> {
        normalize::open_table(self.fetch_plain(Product::InsiderSummary)?, "insider-summary")
    }

    pub fn insider_transactions(&self) -> Result<Table> {
        normalize::open_table(
            self.fetch_plain(Product::InsiderTransactions)?,
            "insider-transactions",
        )
    }

    pub fn institutional_ownership(&self) -> Result<Table> {
        normalize::institutional_ownership(self.fetch_plain(Product::InstitutionalOwnership)?)
    }

    /// Chart bars; `range=1d` returns minute bars.
    pub fn historical_prices(&self, params: &QueryParams) -> Result<Table> {
        let intraday = matches!(
            params.get("range"),
            Some(ParamValue::Text(range)) if range.eq_ignore_ascii_case("1d")
        );
        normalize::historical_prices(
            self.fetch(Product::HistoricalPrices.endpoint(), params)?,
            intraday,
        )
    }

    pub fn recommendation_trends(&self) -> Result<Record> {
        normalize::recommendation_trends(self.fetch_plain(Product::RecommendationTrends)?)
    }

    pub fn news(&self, params: &QueryParams) -> Result<Table> {
        normalize::news(self.fetch(Product::News.endpoint(), params)?)
    }

    pub fn previous_day_prices(&self) -> Result<Series> {
        normalize::previous_day(self.fetch_plain(Product::PreviousDayPrices)?)
    }

    pub fn book(&self) -> Result<Value> {
        self.fetch_plain(Product::Book)
    }

    pub fn price(&self) -> Result<Value> {
        self.fetch_plain(Product::Price)
    }

    pub fn price_target(&self) -> Result<Value> {
        self.fetch_plain(Product::PriceTarget)
    }

    pub fn peers(&self) -> Result<Record> {
        Ok(normalize::peers(self.fetch_plain(Product::Peers)?))
    }

    pub fn quote(&self, params: &QueryParams) -> Result<Value> {
        self.fetch(Product::Quote.endpoint(), params)
    }

    pub fn volume_by_venue(&self) -> Result<Table> {
        normalize::open_table(self.fetch_plain(Product::VolumeByVenue)?, "volume-by-venue")
    }

    fn fetch_plain(&self, product: Product) -> Result<Value> {
        self.fetch(product.endpoint(), &QueryParams::new())
    }

    /// Statement endpoints wrap their rows in one more object.
    fn statement(&self, product: Product, key: &str, params: &QueryParams) -> Result<Value> {
        let symbol = self.require_symbol()?;
        let raw = self.fetch(product.endpoint(), params)?;
        take_key(raw, key, &format!("response.{}.{}", symbol, product.endpoint()))
    }

    /// Run one product by catalog entry.
    pub fn product(&self, product: Product, params: &QueryParams) -> Result<Normalized> {
        if !params.is_empty() && !product.accepts_params() {
            warn!("{} takes no parameters; ignoring them", product.name());
        }

        let result: Normalized = match product {
            Product::KeyStats => self.key_stats(params)?.into(),
            Product::AdvancedStats => self.advanced_stats(params)?.into(),
            Product::BalanceSheet => self.balance_sheet(params)?.into(),
            Product::CashFlow => self.cash_flow(params)?.into(),
            Product::Earnings => self.earnings(params)?.into(),
            Product::Financials => self.financials(params)?.into(),
            Product::IncomeStatement => self.income_statement(params)?.into(),
            Product::Company => self.company(params)?.into(),
            Product::Dividends => self.dividends(params)?.into(),
            Product::Estimates => self.estimates()?.into(),
            Product::FundOwnership => self.fund_ownership()?.into(),
            Product::InsiderRoster => self.insider_roster()?.into(),
            Product::InsiderSummary => self.insider_summary()?.into(),
            Product::InsiderTransactions => self.insider_transactions()?.into(),
            Product::InstitutionalOwnership => self.institutional_ownership()?.into(),
            Product::HistoricalPrices => self.historical_prices(params)?.into(),
            Product::RecommendationTrends => self.recommendation_trends()?.into(),
            Product::News => self.news(params)?.into(),
            Product::PreviousDayPrices => self.previous_day_prices()?.into(),
            Product::Book => self.book()?.into(),
            Product::Price => self.price()?.into(),
            Product::PriceTarget => self.price_target()?.into(),
            Product::Peers => self.peers()?.into(),
            Product::Quote => self.quote(params)?.into(),
            Product::VolumeByVenue => self.volume_by_venue()?.into(),
        };
        Ok(result)
    }

    /// Every base product for the client's symbol, in catalog order.
    pub fn base(&self) -> Result<Vec<(&'static str, Normalized)>> {
        let params = QueryParams::new();
        let mut results = Vec::with_capacity(BASE_PRODUCTS.len());
        for product in BASE_PRODUCTS {
            results.push((product.name(), self.product(*product, &params)?));
        }
        Ok(results)
    }

    // Market data points.

    pub fn market_series(&self, series: MarketSeries) -> Result<Value> {
        self.fetch_market(&series.code())
    }

    pub fn oil_prices(&self, brent: bool) -> Result<Value> {
        self.market_series(MarketSeries::Oil { brent })
    }

    pub fn natural_gas_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::NaturalGas)
    }

    pub fn heating_oil_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::HeatingOil)
    }

    pub fn jet_fuel_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::JetFuel)
    }

    pub fn diesel_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::Diesel)
    }

    pub fn gas_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::Gas)
    }

    pub fn propane_prices(&self) -> Result<Value> {
        self.market_series(MarketSeries::Propane)
    }

    pub fn daily_treasury_rates(&self, tenor: u32) -> Result<Value> {
        self.market_series(MarketSeries::TreasuryRate { tenor })
    }

    pub fn cpi(&self) -> Result<Value> {
        self.market_series(MarketSeries::Cpi)
    }

    pub fn cc_interest_rates(&self) -> Result<Value> {
        self.market_series(MarketSeries::CreditCardInterestRate)
    }

    pub fn fed_fund_rate(&self) -> Result<Value> {
        self.market_series(MarketSeries::FedFundRate)
    }

    pub fn real_gdp(&self) -> Result<Value> {
        self.market_series(MarketSeries::RealGdp)
    }

    pub fn imf(&self) -> Result<Value> {
        self.market_series(MarketSeries::InstitutionalMoneyFunds)
    }

    pub fn initial_claims(&self) -> Result<Value> {
        self.market_series(MarketSeries::InitialClaims)
    }

    pub fn industrial_production_interest(&self) -> Result<Value> {
        self.market_series(MarketSeries::IndustrialProduction)
    }

    pub fn mortgage_rates(&self, term: u32) -> Result<Value> {
        self.market_series(MarketSeries::MortgageRate { term })
    }

    pub fn total_housing_starts(&self) -> Result<Value> {
        self.market_series(MarketSeries::HousingStarts)
    }

    pub fn total_payrolls(&self) -> Result<Value> {
        self.market_series(MarketSeries::TotalPayrolls)
    }

    pub fn total_vehicle_sales(&self) -> Result<Value> {
        self.market_series(MarketSeries::VehicleSales)
    }

    pub fn retail_money_funds(&self) -> Result<Value> {
        self.market_series(MarketSeries::RetailMoneyFunds)
    }

    pub fn unemployment_rate(&self) -> Result<Value> {
        self.market_series(MarketSeries::UnemploymentRate)
    }

    pub fn recession_probability(&self) -> Result<Value> {
        self.market_series(MarketSeries::RecessionProbability)
    }

    pub fn commodities(&self) -> Result<Table> {
        self.aggregate(COMMODITIES)
    }

    pub fn economic_data(&self) -> Result<Table> {
        self.aggregate(ECONOMIC_DATA)
    }

    fn aggregate(&self, catalog: &[MarketSeries]) -> Result<Table> {
        let mut pairs = Vec::with_capacity(catalog.len());
        for series in catalog {
            pairs.push((series.label().to_string(), self.market_series(*series)?));
        }
        Ok(Table::from_pairs("series", "value", pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;

    use serde_json::json;

    type Call = (String, Vec<(String, String)>);

    /// Canned responses keyed by the batch `types` parameter, or by URL for market calls.
    #[derive(Default)]
    struct FakeTransport {
        responses: HashMap<String, Value>,
        stream_body: String,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeTransport {
        fn respond(mut self, key: &str, body: Value) -> Self {
            self.responses.insert(key.to_string(), body);
            self
        }

        fn batch(self, endpoint: &str, payload: Value) -> Self {
            self.respond(endpoint, json!({ "AAPL": { endpoint: payload } }))
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), params.to_vec()));
            let key = params
                .iter()
                .find(|(name, _)| name == "types")
                .map(|(_, value)| value.as_str())
                .unwrap_or(url);
            self.responses
                .get(key)
                .cloned()
                .ok_or_else(|| AppError::Status {
                    status: 404,
                    url: url.to_string(),
                })
        }

        fn open_stream(&self, url: &str) -> Result<EventStream> {
            self.calls.borrow_mut().push((url.to_string(), Vec::new()));
            Ok(EventStream::new(Cursor::new(
                self.stream_body.clone().into_bytes(),
            )))
        }
    }

    fn endpoints() -> Endpoints {
        Endpoints {
            batch: "https://api.test/batch".to_string(),
            market: "https://api.test/market/{series}".to_string(),
            stream: "https://sse.test/{endpoint}?token={token}&symbols={symbol}".to_string(),
        }
    }

    fn client(transport: FakeTransport) -> IexClient<FakeTransport> {
        IexClient::with_transport(Some("aapl"), Some("sk_test"), endpoints(), transport)
            .expect("client builds")
    }

    fn param<'a>(call: &'a Call, name: &str) -> Option<&'a str> {
        call.1
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn symbol_is_upper_cased_for_every_request() {
        let client = client(FakeTransport::default().batch("price", json!(190.5)));
        assert_eq!(client.symbol(), Some("AAPL"));

        assert_eq!(client.price().expect("price"), json!(190.5));
        let calls = client.transport().calls();
        assert_eq!(calls[0].0, "https://api.test/batch");
        assert_eq!(param(&calls[0], "symbols"), Some("AAPL"));
        assert_eq!(param(&calls[0], "types"), Some("price"));
        assert_eq!(param(&calls[0], "token"), Some("sk_test"));
    }

    #[test]
    fn construction_requires_a_token() {
        let missing =
            IexClient::with_transport(Some("AAPL"), None, endpoints(), FakeTransport::default());
        assert!(matches!(missing, Err(AppError::MissingToken)));

        let blank = IexClient::with_transport(
            Some("AAPL"),
            Some("  "),
            endpoints(),
            FakeTransport::default(),
        );
        assert!(matches!(blank, Err(AppError::MissingToken)));
    }

    #[test]
    fn batch_calls_without_symbol_fail_before_sending() {
        let client =
            IexClient::with_transport(None, Some("sk_test"), endpoints(), FakeTransport::default())
                .expect("client builds");

        let err = client.quote(&QueryParams::new()).expect_err("needs a symbol");
        assert!(matches!(err, AppError::MissingSymbol));
        assert!(client.transport().calls().is_empty());
    }

    #[test]
    fn optional_params_are_forwarded_as_strings() {
        let client = client(
            FakeTransport::default().batch("balance-sheet", json!({"balancesheet": []})),
        );
        let params = QueryParams::new()
            .with("period", "quarter")
            .with("last", 4)
            .with("nocache", false);

        let table = client.balance_sheet(&params).expect("table");
        assert!(table.is_empty());
        assert_eq!(table.columns(), fields::BALANCE_SHEET);

        let calls = client.transport().calls();
        assert_eq!(param(&calls[0], "period"), Some("quarter"));
        assert_eq!(param(&calls[0], "last"), Some("4"));
        assert_eq!(param(&calls[0], "nocache"), Some("false"));
    }

    #[test]
    fn statements_unwrap_nested_rows() {
        let client = client(FakeTransport::default().batch(
            "income",
            json!({"symbol": "AAPL", "income": [
                {"reportDate": "2023-09-30", "totalRevenue": 383_285, "currency": "USD"}
            ]}),
        ));
        let table = client.income_statement(&QueryParams::new()).expect("table");
        assert_eq!(table.columns(), fields::INCOME_STATEMENT);
        assert_eq!(table.cell(0, "totalRevenue"), Some(&json!(383_285)));
    }

    #[test]
    fn missing_endpoint_is_a_shape_error() {
        let client = client(FakeTransport::default().respond("stats", json!({"AAPL": {}})));
        let err = client.key_stats(&QueryParams::new()).expect_err("no stats");
        assert!(err.is_shape());
        assert_eq!(err.to_string(), "response is missing `response.AAPL.stats`");
    }

    #[test]
    fn missing_symbol_in_response_is_a_shape_error() {
        let client = client(FakeTransport::default().respond("quote", json!({})));
        let err = client.quote(&QueryParams::new()).expect_err("no symbol key");
        assert!(err.is_shape());
    }

    #[test]
    fn transport_errors_propagate_unchanged() {
        let client = client(FakeTransport::default());
        let err = client.book().expect_err("nothing canned");
        assert!(err.is_transport());
    }

    #[test]
    fn empty_estimates_propagate_index_failure() {
        let client = client(FakeTransport::default().batch("estimates", json!({"estimates": []})));
        let err = client.estimates().expect_err("empty");
        assert!(matches!(err, AppError::EmptySequence { .. }));
    }

    #[test]
    fn intraday_range_selects_minute_bars() {
        let client = client(FakeTransport::default().batch(
            "chart",
            json!([{"date": "2024-01-05", "minute": "09:30", "close": 181.2}]),
        ));
        let table = client
            .historical_prices(&QueryParams::new().with("range", "1d"))
            .expect("table");
        assert_eq!(table.columns(), fields::MINUTE);
        assert_eq!(table.cell(0, "minute"), Some(&json!("09:30")));
    }

    #[test]
    fn market_series_pass_token_as_query_parameter() {
        let client = client(
            FakeTransport::default().respond("https://api.test/market/DCOILBRENTEU", json!(82.1)),
        );
        assert_eq!(client.oil_prices(true).expect("brent"), json!(82.1));

        let calls = client.transport().calls();
        assert_eq!(calls[0].1, vec![("token".to_string(), "sk_test".to_string())]);
    }

    #[test]
    fn market_series_work_without_symbol() {
        let transport =
            FakeTransport::default().respond("https://api.test/market/MORTGAGE15US", json!(6.1));
        let client = IexClient::with_transport(None, Some("sk_test"), endpoints(), transport)
            .expect("client builds");
        assert_eq!(client.mortgage_rates(15).expect("rate"), json!(6.1));
    }

    #[test]
    fn commodities_aggregate_in_catalog_order() {
        let mut transport = FakeTransport::default();
        for (idx, series) in COMMODITIES.iter().enumerate() {
            transport = transport.respond(
                &format!("https://api.test/market/{}", series.code()),
                json!(idx),
            );
        }
        let client = client(transport);

        let table = client.commodities().expect("table");
        assert_eq!(table.columns(), ["series", "value"]);
        assert_eq!(table.len(), COMMODITIES.len());
        assert_eq!(table.cell(0, "series"), Some(&json!("oil")));
        assert_eq!(table.cell(6, "series"), Some(&json!("propane")));
        assert_eq!(table.cell(6, "value"), Some(&json!(6)));
        assert_eq!(
            client.transport().calls()[0].0,
            "https://api.test/market/DCOILWTICO"
        );
    }

    #[test]
    fn economic_data_stops_at_first_failure() {
        let client = client(
            FakeTransport::default().respond("https://api.test/market/DGS30", json!(4.2)),
        );
        let err = client.economic_data().expect_err("cpi missing");
        assert!(err.is_transport());
        assert_eq!(client.transport().calls().len(), 2);
    }

    #[test]
    fn base_collects_every_base_product() {
        let ownership = json!([{
            "entityProperName": "X",
            "adjHolding": 1,
            "adjMv": 2,
            "reportDate": 3,
            "report_date": 3
        }]);
        let transport = FakeTransport::default()
            .batch("stats", json!({"beta": 1.2}))
            .batch("advanced-stats", json!({"peRatio": 30.0}))
            .batch("balance-sheet", json!({"balancesheet": []}))
            .batch("cash-flow", json!({"cashflow": []}))
            .batch("earnings", json!({"earnings": []}))
            .batch("financials", json!({"financials": []}))
            .batch("income", json!({"income": []}))
            .batch("company", json!({"sector": "Tech"}))
            .batch("dividends", json!([]))
            .batch("estimates", json!({"estimates": [{"consensusEPS": 2.1}]}))
            .batch("fund-ownership", ownership.clone())
            .batch("insider-roster", json!([]))
            .batch("insider-summary", json!([]))
            .batch("insider-transactions", json!([]))
            .batch("institutional-ownership", ownership);
        let client = client(transport);

        let results = client.base().expect("all products");
        let names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
        let expected: Vec<&str> = BASE_PRODUCTS.iter().map(Product::name).collect();
        assert_eq!(names, expected);
        assert!(matches!(results[9].1, Normalized::Raw(_)));
        assert!(matches!(results[2].1, Normalized::Table(_)));
    }

    #[test]
    fn streams_use_the_stream_template_and_yield_raw_events() {
        let transport = FakeTransport {
            stream_body: "data: [{\"symbol\":\"AAPL\",\"latestPrice\":190.1}]\n\n".to_string(),
            ..FakeTransport::default()
        };
        let client = client(transport);

        let mut events = client.quote_stream().expect("stream opens");
        let event = events.next().expect("one event").expect("decodes");
        assert_eq!(event, json!([{"symbol": "AAPL", "latestPrice": 190.1}]));
        assert!(events.next().is_none());

        assert_eq!(
            client.transport().calls()[0].0,
            "https://sse.test/stocksUSNoUTP?token=sk_test&symbols=AAPL"
        );

        client.news_stream().expect("stream opens");
        assert_eq!(
            client.transport().calls()[1].0,
            "https://sse.test/news-stream?token=sk_test&symbols=AAPL"
        );
    }

    #[test]
    fn product_dispatch_matches_direct_accessor() {
        let trends = json!([{
            "ratingBuy": 3,
            "ratingOverweight": 2,
            "ratingSell": 1,
            "ratingUnderweight": 0,
            "ratingHold": 5
        }]);
        let client = client(FakeTransport::default().batch("recommendation-trends", trends));

        let direct = client.recommendation_trends().expect("direct");
        let dispatched = client
            .product(Product::RecommendationTrends, &QueryParams::new())
            .expect("dispatched");
        assert_eq!(dispatched, Normalized::Record(direct));
    }
}
