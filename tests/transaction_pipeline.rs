//! Build, fill, sign and submit against one mock node per shard.

mod common;

use std::net::SocketAddr;

use alloy::primitives::{Address, Bytes};
use serde_json::{json, Value};

use common::{methods, start_scripted_node, unused_addr, url_of, RequestLog};
use seele_sdk::blockchain::{
    parse_address, recover_signer, BlockchainError, SeeleClient, TxBuilder, Wallet,
};
use seele_sdk::routing::ShardRouter;
use seele_sdk::rpc::RpcError;

const PRIVATE_KEY: &str = "0x67004d6fa8c80292640925109071320acd541409fb1948a91e82e460d7d5ad0e";
// Both accounts live on shard 1.
const SENDER: &str = "0x6e21f6b5efb13424c26f701c7bf47a68981c3e41";
const RECIPIENT: &str = "0xffea804fb3f6e5e9de238d81ccbcbf7cc3700002";

struct Network {
    logs: Vec<RequestLog>,
    builder: TxBuilder,
}

fn home_shard_script(add_tx: Value) -> Vec<(&'static str, Value)> {
    vec![
        ("seele_getAccountNonce", json!(7)),
        ("seele_getBalance", json!({"Account": SENDER, "Balance": 5000})),
        ("seele_estimateGas", json!(21000)),
        ("seele_addTx", add_tx),
    ]
}

/// Shard 1 answers with `shard_one`; shards 2..=4 answer nothing.
async fn start_network(shard_one: Vec<(&'static str, Value)>) -> Network {
    let mut addrs: Vec<SocketAddr> = Vec::new();
    let mut logs = Vec::new();

    let (addr, log) = start_scripted_node(shard_one).await;
    addrs.push(addr);
    logs.push(log);
    for _ in 2..=4 {
        let (addr, log) = start_scripted_node(vec![]).await;
        addrs.push(addr);
        logs.push(log);
    }

    let endpoints = addrs.into_iter().map(url_of).collect();
    let client = SeeleClient::new(ShardRouter::new(endpoints, 2_000));
    Network {
        logs,
        builder: TxBuilder::new(client),
    }
}

fn recipient() -> Address {
    parse_address(RECIPIENT).unwrap()
}

#[tokio::test]
async fn test_fill_queries_sender_shard_in_order() {
    let network = start_network(home_shard_script(json!(true))).await;
    let tx = TxBuilder::init(parse_address(SENDER).unwrap(), recipient(), 1000, Bytes::new());

    let filled = network.builder.fill_async(tx.clone()).await.unwrap();

    assert_eq!(filled.account_nonce, 7);
    assert_eq!(filled.gas_limit, 21000);
    assert_eq!(filled.amount, 1000);
    assert_eq!(filled.gas_price, 1);
    assert_eq!(filled.to, tx.to);

    assert_eq!(
        methods(&network.logs[0]),
        vec!["seele_getAccountNonce", "seele_getBalance", "seele_estimateGas"]
    );
    for other in &network.logs[1..] {
        assert!(other.lock().unwrap().is_empty());
    }

    let requests = network.logs[0].lock().unwrap();
    let draft = &requests[2]["params"][0]["Data"];
    assert_eq!(draft["Amount"], json!(0));
    assert_eq!(draft["GasPrice"], json!(1));
    assert_eq!(draft["GasLimit"], json!(5000));
    assert_eq!(draft["AccountNonce"], json!(7));
    assert_eq!(draft["Payload"], json!("0x"));
}

#[tokio::test]
async fn test_send_submits_signed_transfer() {
    let network = start_network(home_shard_script(json!(true))).await;
    let wallet = Wallet::from_private_key(PRIVATE_KEY).unwrap();

    let outcome = network
        .builder
        .send_async(&wallet, recipient(), 1000, Bytes::new())
        .await
        .unwrap();

    assert_eq!(outcome.response, json!(true));
    assert_eq!(
        outcome.signed.hash.to_string(),
        "0x6cbe0adb7273a3d8f7b78f7b59d7aa710823bf5974d54557c89fc3d8fdfcc9bb"
    );
    assert_eq!(recover_signer(&outcome.signed).unwrap(), wallet.address());

    assert_eq!(
        methods(&network.logs[0]),
        vec![
            "seele_getAccountNonce",
            "seele_getBalance",
            "seele_estimateGas",
            "seele_addTx"
        ]
    );
    let requests = network.logs[0].lock().unwrap();
    let submitted = &requests[3]["params"][0];
    assert_eq!(submitted["Hash"], json!(outcome.signed.hash));
    assert_eq!(submitted["Data"]["AccountNonce"], json!(7));
    assert_eq!(submitted["Data"]["GasLimit"], json!(21000));
    assert!(submitted["Signature"]["Sig"].is_string());
}

#[tokio::test]
async fn test_rejected_submission_is_not_retried() {
    let mut script = home_shard_script(Value::Null);
    script.pop();
    let network = start_network(script).await;
    let wallet = Wallet::from_private_key(PRIVATE_KEY).unwrap();

    let err = network
        .builder
        .send_async(&wallet, recipient(), 1000, Bytes::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BlockchainError::Rpc(RpcError::Remote { .. })), "got {:?}", err);
    let submissions = methods(&network.logs[0])
        .into_iter()
        .filter(|method| method == "seele_addTx")
        .count();
    assert_eq!(submissions, 1);
}

#[tokio::test]
async fn test_unreachable_shard_fails_fill() {
    let dead = unused_addr().await;
    let (other, _log) = start_scripted_node(vec![]).await;
    let endpoints = vec![url_of(dead), url_of(other), url_of(other), url_of(other)];
    let builder = TxBuilder::new(SeeleClient::new(ShardRouter::new(endpoints, 2_000)));

    let tx = TxBuilder::init(parse_address(SENDER).unwrap(), recipient(), 1, Bytes::new());
    let err = builder.fill_async(tx).await.unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(RpcError::Connection { .. })), "got {:?}", err);
}

#[test]
fn test_blocking_send() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let network = runtime.block_on(start_network(home_shard_script(json!("accepted"))));
    let wallet = Wallet::from_private_key(PRIVATE_KEY).unwrap();

    let outcome = network
        .builder
        .send(&wallet, recipient(), 1000, Bytes::new())
        .unwrap();
    assert_eq!(outcome.response, json!("accepted"));
    assert_eq!(outcome.signed.data.account_nonce, 7);
}
