//! Conservation invariants under random operation sequences
//!
//! Drives the engine with arbitrary interleavings of deposits,
//! withdrawals, limit orders, and market orders, rejecting failures
//! silently the way callers would, then checks that no token was ever
//! created or destroyed:
//! - Every external wallet plus custody equals the amount originally funded
//! - Custody held by each settlement contract equals the sum of internal balances

use exchange::Exchange;
use proptest::prelude::*;
use settlement::ExternalLedger;
use types::ids::TraderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::token::{SettlementAddress, Symbol, Token};

const TRADERS: usize = 3;
const FUNDING: u64 = 1_000;

#[derive(Debug, Clone)]
enum Op {
    Deposit { trader: usize, token: usize, units: u64 },
    Withdraw { trader: usize, token: usize, units: u64 },
    Limit { trader: usize, token: usize, units: u64, price: u64, side: Side },
    Market { trader: usize, token: usize, units: u64, side: Side },
}

fn sym(ticker: &str) -> Symbol {
    Symbol::new(ticker).unwrap()
}

fn addr(ticker: &str) -> SettlementAddress {
    SettlementAddress::new(format!("0x{}", ticker.to_lowercase()))
}

fn tickers() -> [&'static str; 3] {
    ["DAI", "REP", "ZRX"]
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let trader = 0..TRADERS;
    let token = 0usize..3;
    let tradeable = 1usize..3;
    let units = 1u64..200;
    let price = 1u64..20;
    prop_oneof![
        (trader.clone(), token.clone(), units.clone())
            .prop_map(|(trader, token, units)| Op::Deposit { trader, token, units }),
        (trader.clone(), token, units.clone())
            .prop_map(|(trader, token, units)| Op::Withdraw { trader, token, units }),
        (trader.clone(), tradeable.clone(), units.clone(), price, side_strategy()).prop_map(
            |(trader, token, units, price, side)| Op::Limit { trader, token, units, price, side }
        ),
        (trader, tradeable, units, side_strategy())
            .prop_map(|(trader, token, units, side)| Op::Market { trader, token, units, side }),
    ]
}

fn setup() -> (Exchange<ExternalLedger>, Vec<TraderId>) {
    let mut engine = Exchange::new(Token::new(sym("DAI"), addr("DAI")), ExternalLedger::new());
    engine.register_token(sym("REP"), addr("REP")).unwrap();
    engine.register_token(sym("ZRX"), addr("ZRX")).unwrap();

    let traders: Vec<TraderId> = (0..TRADERS).map(|_| TraderId::new()).collect();
    for trader in &traders {
        for ticker in tickers() {
            engine
                .gateway_mut()
                .fund(&addr(ticker), trader, Quantity::from_u64(FUNDING));
        }
    }
    (engine, traders)
}

fn apply(engine: &mut Exchange<ExternalLedger>, traders: &[TraderId], op: &Op) {
    let symbol_of = |token: usize| sym(tickers()[token]);
    // Failures are part of the input space; only success may mutate
    let _ = match op {
        Op::Deposit { trader, token, units } => engine
            .deposit(&traders[*trader], symbol_of(*token), Quantity::from_u64(*units))
            .map(|_| Quantity::zero()),
        Op::Withdraw { trader, token, units } => engine
            .withdraw(&traders[*trader], symbol_of(*token), Quantity::from_u64(*units))
            .map(|_| Quantity::zero()),
        Op::Limit { trader, token, units, price, side } => engine
            .place_limit_order(
                &traders[*trader],
                symbol_of(*token),
                Quantity::from_u64(*units),
                Price::from_u64(*price),
                *side,
            )
            .map(|_| Quantity::zero()),
        Op::Market { trader, token, units, side } => engine.place_market_order(
            &traders[*trader],
            symbol_of(*token),
            Quantity::from_u64(*units),
            *side,
        ),
    };
}

proptest! {
    #[test]
    fn prop_no_token_created_or_destroyed(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let (mut engine, traders) = setup();
        for op in &ops {
            apply(&mut engine, &traders, op);
        }

        for ticker in tickers() {
            let symbol = sym(ticker);
            let address = addr(ticker);

            let mut internal = Quantity::zero();
            let mut external = Quantity::zero();
            for trader in &traders {
                internal = internal
                    .checked_add(engine.balance_of(trader, symbol))
                    .unwrap();
                external = external
                    .checked_add(engine.gateway().wallet_balance(&address, trader))
                    .unwrap();
            }
            let custody = engine.gateway().custody_balance(&address);

            // Custody backs every internal balance exactly
            prop_assert_eq!(internal, custody);
            // Nothing minted, nothing burned
            prop_assert_eq!(
                external.checked_add(custody).unwrap(),
                Quantity::from_u64(FUNDING * TRADERS as u64)
            );
        }
    }

    #[test]
    fn prop_book_stays_price_time_ordered(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let (mut engine, traders) = setup();
        for op in &ops {
            apply(&mut engine, &traders, op);
        }

        for ticker in ["REP", "ZRX"] {
            let symbol = sym(ticker);
            let bids = engine.orders(symbol, Side::Buy).unwrap();
            for pair in bids.windows(2) {
                prop_assert!(
                    pair[0].price > pair[1].price
                        || (pair[0].price == pair[1].price && pair[0].id < pair[1].id)
                );
            }
            let asks = engine.orders(symbol, Side::Sell).unwrap();
            for pair in asks.windows(2) {
                prop_assert!(
                    pair[0].price < pair[1].price
                        || (pair[0].price == pair[1].price && pair[0].id < pair[1].id)
                );
            }
        }
    }
}
