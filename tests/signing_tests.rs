//! End-to-end signing through the wallet manager: stored key to verified
//! signature, for both chain families.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::utils::rlp::Rlp;
use multichain_wallet_core::blockchain::evm::EvmTransactionRequest;
use multichain_wallet_core::{Chain, WalletConfig, WalletError, WalletManager};
use solana_sdk::hash::Hash;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::system_instruction;
use solana_sdk::transaction::VersionedTransaction;
use std::str::FromStr;

const MNEMONIC: &str =
    "answer gown deal parent december coffee only clog camera pistol taxi minor";

fn evm_request(from: &str) -> EvmTransactionRequest {
    EvmTransactionRequest {
        chain_id: 8453,
        from: from.to_string(),
        to: "0x6b2C0c7be2048Daa9b5527982C29f48062B34D58".to_string(),
        value: "0".to_string(),
        max_fee_per_gas: "1002699069".to_string(),
        max_priority_fee_per_gas: "1000000050".to_string(),
        gas_limit: "337500".to_string(),
        nonce: "91".to_string(),
        data: "0xb80c2f09".to_string(),
    }
}

#[tokio::test]
async fn evm_signature_recovers_to_signing_address() {
    let manager = WalletManager::in_memory(WalletConfig::default());
    let wallet = manager.import_wallet_by_mnemonic(MNEMONIC).await.unwrap();
    let address = wallet.address_for(Chain::Evm).unwrap().to_string();

    let raw = manager
        .sign_evm_transaction(&address, &evm_request(&address))
        .await
        .unwrap();
    assert!(raw.starts_with("0x02"));

    let bytes = hex::decode(&raw[2..]).unwrap();
    let (decoded, signature) = TypedTransaction::decode_signed(&Rlp::new(&bytes)).unwrap();
    let recovered = signature.recover(decoded.sighash()).unwrap();
    assert_eq!(recovered, ethers::types::Address::from_str(&address).unwrap());
}

#[tokio::test]
async fn tampered_evm_payload_breaks_recovery() {
    let manager = WalletManager::in_memory(WalletConfig::default());
    let wallet = manager.import_wallet_by_mnemonic(MNEMONIC).await.unwrap();
    let address = wallet.address_for(Chain::Evm).unwrap().to_string();

    let raw = manager
        .sign_evm_transaction(&address, &evm_request(&address))
        .await
        .unwrap();
    let mut bytes = hex::decode(&raw[2..]).unwrap();

    // Flip one bit of calldata; the signature no longer matches the content.
    let idx = bytes.len() / 2;
    bytes[idx] ^= 0x01;

    let recovered = TypedTransaction::decode_signed(&Rlp::new(&bytes))
        .ok()
        .and_then(|(tx, sig)| sig.recover(tx.sighash()).ok());
    assert_ne!(
        recovered,
        Some(ethers::types::Address::from_str(&address).unwrap())
    );
}

#[tokio::test]
async fn evm_signing_without_key_returns_key_not_found() {
    // Scenario D: nothing stored for this address.
    let manager = WalletManager::in_memory(WalletConfig::default());
    let orphan = "0xC617C43336e46AE430b6f7625CeE60532fF42476";

    let err = manager
        .sign_evm_transaction(orphan, &evm_request(orphan))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::KeyNotFound(_)));
}

#[tokio::test]
async fn solana_round_trip_verifies() {
    let manager = WalletManager::in_memory(WalletConfig::default());
    let wallet = manager.import_wallet_by_mnemonic(MNEMONIC).await.unwrap();
    let address = wallet.address_for(Chain::Solana).unwrap().to_string();
    let payer = Pubkey::from_str(&address).unwrap();

    let instruction = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1_000);
    let message = Message::new_with_blockhash(&[instruction], Some(&payer), &Hash::new_unique());
    let unsigned = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    let unsigned_base64 = BASE64.encode(bincode::serialize(&unsigned).unwrap());

    let signed_base64 = manager
        .sign_solana_transaction(&address, &unsigned_base64)
        .await
        .unwrap();

    let signed: VersionedTransaction =
        bincode::deserialize(&BASE64.decode(signed_base64).unwrap()).unwrap();
    assert_eq!(signed.verify_with_results(), vec![true]);
    // Message content is untouched by signing.
    assert_eq!(signed.message, unsigned.message);
}

#[tokio::test]
async fn solana_message_with_foreign_fee_payer_is_rejected() {
    let manager = WalletManager::in_memory(WalletConfig::default());
    let wallet = manager.import_wallet_by_mnemonic(MNEMONIC).await.unwrap();
    let address = wallet.address_for(Chain::Solana).unwrap().to_string();

    // Fee payer is some other account; our wallet holds no key for it.
    let foreign = Pubkey::new_unique();
    let instruction = system_instruction::transfer(&foreign, &Pubkey::new_unique(), 1_000);
    let message = Message::new_with_blockhash(&[instruction], Some(&foreign), &Hash::new_unique());
    let unsigned = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    let unsigned_base64 = BASE64.encode(bincode::serialize(&unsigned).unwrap());

    let err = manager
        .sign_solana_transaction(&address, &unsigned_base64)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::IncompleteSigners(_)));
}
