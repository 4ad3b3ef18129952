//! Integration tests for the push-based data feed server.
//!
//! These tests drive the contract entry points directly using
//! `cosmwasm_std::testing` mocks, signing Airnode data with real secp256k1
//! keys. The OEV proxy's beneficiary query is answered through
//! `MockQuerier::update_wasm`.
//!
//! Run:
//! ```bash
//! cargo test -p pushfeed-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Api, BankMsg, Binary, ContractResult, CosmosMsg, Env, Int256,
    MemoryStorage, OwnedDeps, Reply, SubMsgResult, SystemResult, Uint128, Uint256, WasmQuery,
};
use k256::ecdsa::SigningKey;
use pushfeed_common::hashing::{
    address_from_pubkey, eth_signed_message_hash, oev_constituent_digest, relayed_data_digest,
    signed_data_digest, OevUpdate,
};
use pushfeed_common::{
    derive_beacon_id, derive_beacon_set_id, DataFeed, PackedOevSignature,
    UpdateConditions, INT224_MAX, INT224_MIN,
};
use pushfeed_server::contract::{execute, instantiate, query, reply};
use pushfeed_server::execute::WITHDRAW_REPLY_ID;
use pushfeed_server::msg::{ExecuteMsg, InstantiateMsg, OevBeneficiaryResponse, QueryMsg};
use pushfeed_server::ContractError;

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

const BID_DENOM: &str = "untrn";

/// Airnode keys are derived from a one-byte seed; each Airnode serves the
/// template with the same number.
const ETH_AIRNODES: [u8; 3] = [11, 12, 13];

// ─── Signing helpers ───

fn airnode(seed: u8) -> [u8; 20] {
    let key = SigningKey::from_slice(&[seed; 32]).unwrap();
    let point = key.verifying_key().to_encoded_point(false);
    address_from_pubkey(point.as_bytes()).unwrap()
}

fn template(seed: u8) -> [u8; 32] {
    [seed; 32]
}

fn beacon(seed: u8) -> [u8; 32] {
    derive_beacon_id(&airnode(seed), &template(seed))
}

fn sign(seed: u8, digest: &[u8; 32]) -> Vec<u8> {
    let key = SigningKey::from_slice(&[seed; 32]).unwrap();
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&eth_signed_message_hash(digest))
        .unwrap();
    let mut out = signature.to_bytes().to_vec();
    out.push(27 + recovery_id.to_byte());
    out
}

fn word(value: Int256) -> [u8; 32] {
    value.to_be_bytes()
}

fn now() -> u32 {
    mock_env().block.time.seconds() as u32
}

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = cosmwasm_std::Timestamp::from_seconds(seconds);
    env
}

// ─── Contract helpers ───

fn setup() -> Deps {
    let mut deps = mock_dependencies();
    let admin = deps.api.addr_make("admin");
    let msg = InstantiateMsg {
        dapi_name_setters: vec![deps.api.addr_make("setter").to_string()],
        bid_denom: BID_DENOM.to_string(),
    };
    instantiate(deps.as_mut(), mock_env(), message_info(&admin, &[]), msg).unwrap();
    deps
}

fn push_value(
    deps: &mut Deps,
    seed: u8,
    timestamp: u32,
    value: Int256,
) -> Result<(), ContractError> {
    let data = word(value);
    let digest = signed_data_digest(&template(seed), timestamp, &data);
    let msg = ExecuteMsg::UpdateBeaconWithSignedData {
        airnode: hex::encode(airnode(seed)),
        template_id: hex::encode(template(seed)),
        timestamp,
        data: hex::encode(data),
        signature: hex::encode(sign(seed, &digest)),
    };
    let relay = deps.api.addr_make("relay");
    execute(deps.as_mut(), mock_env(), message_info(&relay, &[]), msg).map(|_| ())
}

fn update_set(deps: &mut Deps, seeds: &[u8]) -> Result<(), ContractError> {
    let anyone = deps.api.addr_make("anyone");
    let msg = ExecuteMsg::UpdateBeaconSetWithBeacons {
        beacon_ids: seeds.iter().map(|s| hex::encode(beacon(*s))).collect(),
    };
    execute(deps.as_mut(), mock_env(), message_info(&anyone, &[]), msg).map(|_| ())
}

fn set_id(seeds: &[u8]) -> [u8; 32] {
    let ids: Vec<[u8; 32]> = seeds.iter().map(|s| beacon(*s)).collect();
    derive_beacon_set_id(&ids)
}

fn read(deps: &Deps, msg: QueryMsg) -> Result<DataFeed, ContractError> {
    query(deps.as_ref(), mock_env(), msg).map(|res| from_json(res).unwrap())
}

fn read_id(deps: &Deps, id: &[u8; 32]) -> Result<DataFeed, ContractError> {
    read(
        deps,
        QueryMsg::ReadDataFeedWithId {
            data_feed_id: hex::encode(id),
        },
    )
}

fn set_beneficiary(deps: &mut Deps, beneficiary: Option<String>) {
    deps.querier.update_wasm(move |query| match query {
        WasmQuery::Smart { msg, .. } => {
            let request: serde_json::Value = serde_json::from_slice(msg).unwrap();
            assert_eq!(request, serde_json::json!({ "oev_beneficiary": {} }));
            SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&OevBeneficiaryResponse {
                    beneficiary: beneficiary.clone(),
                })
                .unwrap(),
            ))
        }
        _ => panic!("unexpected wasm query"),
    });
}

/// A searcher's OEV update, signed by `signers` among `seeds` (others abstain).
fn oev_update(
    deps: &Deps,
    seeds: &[u8],
    signers: &[u8],
    data_feed_id: [u8; 32],
    timestamp: u32,
    value: Int256,
    bid: u128,
) -> ExecuteMsg {
    let oev_proxy = deps.api.addr_make("oev_proxy");
    let searcher = deps.api.addr_make("searcher");
    let data = word(value);
    let update_id = [0xaa; 32];
    let proxy_bytes = deps.api.addr_canonicalize(oev_proxy.as_str()).unwrap();
    let searcher_bytes = deps.api.addr_canonicalize(searcher.as_str()).unwrap();
    let update_hash = OevUpdate {
        oev_proxy: proxy_bytes.as_slice(),
        data_feed_id: &data_feed_id,
        update_id: &update_id,
        timestamp,
        data: &data,
        searcher: searcher_bytes.as_slice(),
        bid_amount: bid,
    }
    .hash();

    let packed = seeds
        .iter()
        .map(|&seed| {
            let signature = if signers.contains(&seed) {
                sign(seed, &oev_constituent_digest(&update_hash, &template(seed)))
            } else {
                vec![]
            };
            hex::encode(
                PackedOevSignature {
                    airnode: airnode(seed),
                    template_id: template(seed),
                    signature,
                }
                .encode(),
            )
        })
        .collect();

    ExecuteMsg::UpdateOevProxyDataFeedWithSignedData {
        oev_proxy: oev_proxy.to_string(),
        data_feed_id: hex::encode(data_feed_id),
        update_id: hex::encode(update_id),
        timestamp,
        data: hex::encode(data),
        packed_oev_update_signatures: packed,
        bid_amount: Uint128::new(bid),
    }
}

fn searcher_pays(deps: &mut Deps, msg: ExecuteMsg, bid: u128) -> Result<(), ContractError> {
    let searcher = deps.api.addr_make("searcher");
    let funds = if bid == 0 { vec![] } else { coins(bid, BID_DENOM) };
    execute(deps.as_mut(), mock_env(), message_info(&searcher, &funds), msg).map(|_| ())
}

// ─── Tests ───

#[test]
fn test_beacon_set_lifecycle() {
    // Three Airnodes push ETH/USD, the set is aggregated and read through its dAPI name.
    let mut deps = setup();
    let t = now() - 300;

    // 1. Each Airnode pushes a signed value
    for (seed, value) in ETH_AIRNODES.iter().zip([100i128, 80, 120]) {
        push_value(&mut deps, *seed, t, Int256::from(value)).unwrap();
    }

    // 2. Aggregate: odd cardinality takes the middle value
    update_set(&mut deps, &ETH_AIRNODES).unwrap();
    let set = read_id(&deps, &set_id(&ETH_AIRNODES)).unwrap();
    assert_eq!(set.value, Int256::from(100));
    assert_eq!(set.timestamp, t);

    // 3. Bind the dAPI name and read through it
    let setter = deps.api.addr_make("setter");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&setter, &[]),
        ExecuteMsg::SetDapiName {
            dapi_name: "ETH/USD".to_string(),
            data_feed_id: hex::encode(set_id(&ETH_AIRNODES)),
        },
    )
    .unwrap();
    let by_name = read(
        &deps,
        QueryMsg::ReadDataFeedWithDapiName {
            dapi_name: "ETH/USD".to_string(),
        },
    )
    .unwrap();
    assert_eq!(by_name, set);

    // 4. One Airnode moves; the set follows
    push_value(&mut deps, 11, t + 60, Int256::from(130)).unwrap();
    push_value(&mut deps, 12, t + 60, Int256::from(125)).unwrap();
    update_set(&mut deps, &ETH_AIRNODES).unwrap();
    let set = read_id(&deps, &set_id(&ETH_AIRNODES)).unwrap();
    assert_eq!(set.value, Int256::from(125));
    assert_eq!(set.timestamp, t + 60);

    // 5. Repeating the aggregation changes nothing
    let err = update_set(&mut deps, &ETH_AIRNODES).unwrap_err();
    assert_eq!(err.code(), "NoChangeToApply");

    eprintln!("test_beacon_set_lifecycle passed");
}

#[test]
fn test_even_set_and_negative_floor() {
    let mut deps = setup();
    let t = now() - 100;

    push_value(&mut deps, 21, t, Int256::from(100)).unwrap();
    push_value(&mut deps, 22, t, Int256::from(80)).unwrap();
    update_set(&mut deps, &[21, 22]).unwrap();
    assert_eq!(
        read_id(&deps, &set_id(&[21, 22])).unwrap().value,
        Int256::from(90)
    );

    push_value(&mut deps, 23, t, Int256::from(-1)).unwrap();
    push_value(&mut deps, 24, t, Int256::from(-2)).unwrap();
    update_set(&mut deps, &[23, 24]).unwrap();
    assert_eq!(
        read_id(&deps, &set_id(&[23, 24])).unwrap().value,
        Int256::from(-2)
    );

    eprintln!("test_even_set_and_negative_floor passed");
}

#[test]
fn test_monotonic_freshness() {
    let mut deps = setup();
    let t = now() - 1000;

    push_value(&mut deps, 11, t, Int256::from(1)).unwrap();

    // Equal and older timestamps are rejected
    for stale in [t, t - 1] {
        let err = push_value(&mut deps, 11, stale, Int256::from(2)).unwrap_err();
        assert_eq!(err.code(), "DoesNotAdvanceTimestamp");
    }

    // More than an hour ahead is implausible; exactly an hour is accepted
    let err = push_value(&mut deps, 11, now() + 3601, Int256::from(3)).unwrap_err();
    assert_eq!(err.code(), "TimestampNotPlausible");
    push_value(&mut deps, 11, now() + 3600, Int256::from(3)).unwrap();

    // A rejected write leaves the record untouched
    let feed = read_id(&deps, &beacon(11)).unwrap();
    assert_eq!(feed.value, Int256::from(3));
    assert_eq!(feed.timestamp, now() + 3600);

    eprintln!("test_monotonic_freshness passed");
}

#[test]
fn test_guard_boundaries() {
    let mut deps = setup();
    let mut t = now() - 100;

    for value in [INT224_MAX, INT224_MIN] {
        push_value(&mut deps, 11, t, value).unwrap();
        t += 1;
    }
    for value in [INT224_MAX + Int256::from(1), INT224_MIN - Int256::from(1)] {
        let err = push_value(&mut deps, 11, t, value).unwrap_err();
        assert_eq!(err.code(), "ValueOutOfRange");
        t += 1;
    }

    eprintln!("test_guard_boundaries passed");
}

#[test]
fn test_relayed_signature_binds_relayer() {
    let mut deps = setup();
    let relayer = airnode(40);
    let data = word(Int256::from(7));
    let digest = relayed_data_digest(&template(11), now(), &data, &relayer);
    let signature = hex::encode(sign(11, &digest));
    let anyone = deps.api.addr_make("anyone");

    // Direct path does not accept a relayed signature
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&anyone, &[]),
        ExecuteMsg::UpdateBeaconWithSignedData {
            airnode: hex::encode(airnode(11)),
            template_id: hex::encode(template(11)),
            timestamp: now(),
            data: hex::encode(data),
            signature: signature.clone(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "SignatureMismatch");

    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&anyone, &[]),
        ExecuteMsg::UpdateBeaconWithRelayedSignedData {
            airnode: hex::encode(airnode(11)),
            relayer: hex::encode(relayer),
            template_id: hex::encode(template(11)),
            timestamp: now(),
            data: hex::encode(data),
            signature,
        },
    )
    .unwrap();
    assert_eq!(read_id(&deps, &beacon(11)).unwrap().value, Int256::from(7));

    eprintln!("test_relayed_signature_binds_relayer passed");
}

#[test]
fn test_oev_auction_and_withdrawal() {
    // A searcher wins an update for the ETH/USD set, the proxy reads it,
    // and the bid is withdrawn to the proxy's beneficiary.
    let mut deps = setup();
    let t = now() - 120;
    for (seed, value) in ETH_AIRNODES.iter().zip([100i128, 80, 120]) {
        push_value(&mut deps, *seed, t, Int256::from(value)).unwrap();
    }
    update_set(&mut deps, &ETH_AIRNODES).unwrap();
    let feed_id = set_id(&ETH_AIRNODES);
    let oev_proxy = deps.api.addr_make("oev_proxy");

    // 1. Majority (2 of 3) signs a fresher value for 1000 untrn
    let msg = oev_update(&deps, &ETH_AIRNODES, &[11, 13], feed_id, t + 60, Int256::from(111), 1000);
    searcher_pays(&mut deps, msg, 1000).unwrap();

    // 2. The proxy sees the overlay; everyone else sees the public value
    let as_proxy = read(
        &deps,
        QueryMsg::ReadDataFeedWithIdAsOevProxy {
            oev_proxy: oev_proxy.to_string(),
            data_feed_id: hex::encode(feed_id),
        },
    )
    .unwrap();
    assert_eq!(as_proxy.value, Int256::from(111));
    assert_eq!(read_id(&deps, &feed_id).unwrap().value, Int256::from(100));

    // 3. Public catches up past the overlay; the proxy falls back to it
    for seed in ETH_AIRNODES {
        push_value(&mut deps, seed, t + 60, Int256::from(200)).unwrap();
    }
    update_set(&mut deps, &ETH_AIRNODES).unwrap();
    let as_proxy = read(
        &deps,
        QueryMsg::ReadDataFeedWithIdAsOevProxy {
            oev_proxy: oev_proxy.to_string(),
            data_feed_id: hex::encode(feed_id),
        },
    )
    .unwrap();
    assert_eq!(as_proxy.value, Int256::from(200));

    // 4. Only one signature: not a majority
    let msg = oev_update(&deps, &ETH_AIRNODES, &[12], feed_id, t + 90, Int256::from(1), 0);
    let err = searcher_pays(&mut deps, msg, 0).unwrap_err();
    assert_eq!(err.code(), "InsufficientSignatures");

    // 5. Withdraw the 1000 untrn
    let beneficiary = deps.api.addr_make("beneficiary");
    set_beneficiary(&mut deps, Some(beneficiary.to_string()));
    let balance: Uint128 = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::OevProxyBalance {
                oev_proxy: oev_proxy.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(balance, Uint128::new(1000));

    let anyone = deps.api.addr_make("anyone");
    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&anyone, &[]),
        ExecuteMsg::Withdraw {
            oev_proxy: oev_proxy.to_string(),
        },
    )
    .unwrap();
    assert_eq!(res.messages.len(), 1);
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: beneficiary.to_string(),
            amount: coins(1000, BID_DENOM),
        })
    );

    // 6. Nothing left to withdraw
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&anyone, &[]),
        ExecuteMsg::Withdraw {
            oev_proxy: oev_proxy.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "NoPendingBalance");

    // 7. A failed transfer surfaces as WithdrawalFailed from the reply
    let err = reply(
        deps.as_mut(),
        mock_env(),
        Reply {
            id: WITHDRAW_REPLY_ID,
            payload: Binary::default(),
            gas_used: 0,
            result: SubMsgResult::Err("insufficient funds".to_string()),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "WithdrawalFailed");

    eprintln!("test_oev_auction_and_withdrawal passed");
}

#[test]
fn test_oev_single_beacon_and_replay() {
    let mut deps = setup();
    let feed_id = beacon(11);

    // Abstaining on a single Beacon is a missing signature
    let msg = oev_update(&deps, &[11], &[], feed_id, now(), Int256::from(5), 0);
    let err = searcher_pays(&mut deps, msg, 0).unwrap_err();
    assert_eq!(err.code(), "MissingSignature");

    // Signed update for another Beacon's id
    let msg = oev_update(&deps, &[11], &[11], beacon(12), now(), Int256::from(5), 0);
    let err = searcher_pays(&mut deps, msg, 0).unwrap_err();
    assert_eq!(err.code(), "FeedIdMismatch");

    // A valid update cannot be replayed by another searcher
    let msg = oev_update(&deps, &[11], &[11], feed_id, now(), Int256::from(5), 0);
    let thief = deps.api.addr_make("thief");
    let err = execute(deps.as_mut(), mock_env(), message_info(&thief, &[]), msg.clone())
        .unwrap_err();
    assert_eq!(err.code(), "SignatureMismatch");

    searcher_pays(&mut deps, msg, 0).unwrap();

    eprintln!("test_oev_single_beacon_and_replay passed");
}

#[test]
fn test_subscription_flow() {
    // Register a 1% / 1 day subscription, check conditions, fulfill it.
    let mut deps = setup();
    let relayer = airnode(40);
    let sponsor = deps.api.addr_make("sponsor");
    let conditions = UpdateConditions {
        deviation_threshold_percentage: Uint256::from(1_000_000u64),
        deviation_reference: Int256::zero(),
        heartbeat_interval: 86_400,
    };

    // 1. Register
    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&sponsor, &[]),
        ExecuteMsg::RegisterBeaconUpdateSubscription {
            airnode: hex::encode(airnode(11)),
            template_id: hex::encode(template(11)),
            conditions: conditions.clone(),
            relayer: hex::encode(relayer),
            sponsor: sponsor.to_string(),
        },
    )
    .unwrap();
    let subscription_id = res
        .attributes
        .iter()
        .find(|a| a.key == "subscription_id")
        .unwrap()
        .value
        .clone();

    let is_due = |deps: &Deps, env: Env, value: i128| -> bool {
        from_json(
            query(
                deps.as_ref(),
                env,
                QueryMsg::ConditionSubscriptionUpdate {
                    subscription_id: subscription_id.clone(),
                    data: hex::encode(word(Int256::from(value))),
                    condition_parameters: hex::encode(conditions.encode()),
                },
            )
            .unwrap(),
        )
        .unwrap()
    };

    // 2. Never written: always due
    assert!(is_due(&deps, mock_env(), 1000));

    // 3. Fulfill through the relayer
    let data = word(Int256::from(1000));
    let digest = relayed_data_digest(&template(11), now(), &data, &relayer);
    let fulfiller = deps.api.addr_make("fulfiller");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&fulfiller, &[]),
        ExecuteMsg::FulfillBeaconSubscription {
            subscription_id: subscription_id.clone(),
            timestamp: now(),
            data: hex::encode(data),
            signature: hex::encode(sign(11, &digest)),
        },
    )
    .unwrap();

    // 4. Deviation: 0.5% is not due, 1% is
    assert!(!is_due(&deps, mock_env(), 1005));
    assert!(is_due(&deps, mock_env(), 1010));
    assert!(is_due(&deps, mock_env(), 990));

    // 5. Heartbeat
    let next_day = mock_env().block.time.seconds() + 86_400;
    assert!(!is_due(&deps, env_at(next_day - 1), 1000));
    assert!(is_due(&deps, env_at(next_day), 1000));

    eprintln!("test_subscription_flow passed");
}

#[test]
fn test_beacon_set_subscription_flow() {
    let mut deps = setup();
    let t = now() - 60;
    for (seed, value) in ETH_AIRNODES.iter().zip([100i128, 80, 120]) {
        push_value(&mut deps, *seed, t, Int256::from(value)).unwrap();
    }
    let sponsor = deps.api.addr_make("sponsor");
    let ids: Vec<String> = ETH_AIRNODES.iter().map(|s| hex::encode(beacon(*s))).collect();
    let conditions = UpdateConditions {
        deviation_threshold_percentage: Uint256::from(500_000u64),
        deviation_reference: Int256::zero(),
        heartbeat_interval: 0,
    };

    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&sponsor, &[]),
        ExecuteMsg::RegisterBeaconSetUpdateSubscription {
            beacon_ids: ids.clone(),
            conditions: conditions.clone(),
            relayer: hex::encode(airnode(40)),
            sponsor: sponsor.to_string(),
        },
    )
    .unwrap();
    let subscription_id = res
        .attributes
        .iter()
        .find(|a| a.key == "subscription_id")
        .unwrap()
        .value
        .clone();

    let check = |deps: &Deps| -> Result<bool, ContractError> {
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::ConditionSubscriptionUpdate {
                subscription_id: subscription_id.clone(),
                data: ids.concat(),
                condition_parameters: hex::encode(conditions.encode()),
            },
        )
        .map(|res| from_json(res).unwrap())
    };
    assert!(check(&deps).unwrap());

    let anyone = deps.api.addr_make("anyone");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&anyone, &[]),
        ExecuteMsg::FulfillBeaconSetSubscription {
            subscription_id: subscription_id.clone(),
        },
    )
    .unwrap();
    assert_eq!(
        read_id(&deps, &set_id(&ETH_AIRNODES)).unwrap().value,
        Int256::from(100)
    );
    assert!(!check(&deps).unwrap());

    // Median moves from 100 to 101: 1% against a 0.5% threshold
    push_value(&mut deps, 11, t + 10, Int256::from(101)).unwrap();
    assert!(check(&deps).unwrap());

    eprintln!("test_beacon_set_subscription_flow passed");
}

#[test]
fn test_dapi_name_rebinding() {
    let mut deps = setup();
    push_value(&mut deps, 11, now(), Int256::from(42)).unwrap();
    let setter = deps.api.addr_make("setter");

    // Binding the same id twice succeeds and emits both times
    for _ in 0..2 {
        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&setter, &[]),
            ExecuteMsg::SetDapiName {
                dapi_name: "BTC/USD".to_string(),
                data_feed_id: hex::encode(beacon(11)),
            },
        )
        .unwrap();
        assert_eq!(res.events[0].ty, "pushfeed_dapi_name_set");
        let feed = read(
            &deps,
            QueryMsg::ReadDataFeedWithDapiName {
                dapi_name: "BTC/USD".to_string(),
            },
        )
        .unwrap();
        assert_eq!(feed.value, Int256::from(42));
    }

    // Strangers cannot bind names
    let stranger = deps.api.addr_make("stranger");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&stranger, &[]),
        ExecuteMsg::SetDapiName {
            dapi_name: "BTC/USD".to_string(),
            data_feed_id: String::new(),
        },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("Unauthorized"),
        "Expected unauthorized error, got: {:?}",
        err
    );

    // Unbound names do not resolve
    let err = read(
        &deps,
        QueryMsg::ReadDataFeedWithDapiName {
            dapi_name: "SOL/USD".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "NameNotBound");

    eprintln!("test_dapi_name_rebinding passed");
}
