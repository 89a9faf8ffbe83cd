mod common;

use anyhow::Result;
use bankledger::application::{
    ACCOUNT_CREATION_FAILED, BankService, FundTransferStatus, TransactionStatus,
};
use bankledger::domain::{Role, Transaction, TransactionType};
use common::{StandardBank, ledger_total};

#[test]
fn test_reference_scenario() -> Result<()> {
    let (mut ledger, mut log) = StandardBank::ledger();
    let mut bank = BankService::new(&mut ledger, &mut log);

    assert_eq!(
        bank.deposit("2", 500, Role::Customer),
        TransactionStatus::success(2000)
    );
    assert_eq!(
        bank.withdrawal("1", 50, Role::Customer),
        TransactionStatus::success(50)
    );
    assert_eq!(
        bank.transfer_fund("1", "2", 50, Role::Customer),
        FundTransferStatus::success(0, 2050)
    );
    assert_eq!(
        bank.get_total_bank_balance(Role::BankManager),
        TransactionStatus::success(2050)
    );

    Ok(())
}

#[test]
fn test_session_with_account_opening() -> Result<()> {
    let (mut ledger, mut log) = StandardBank::ledger();
    let mut bank = BankService::new(&mut ledger, &mut log);

    // Account creation
    assert_eq!(bank.create_user_account("Johnny Depp", 500, Role::Customer), "3");
    assert_eq!(
        bank.create_user_account("Johnny Depp", -500, Role::Customer),
        ACCOUNT_CREATION_FAILED
    );
    assert_eq!(
        bank.create_user_account("Johnny Depp", 500, Role::BankManager),
        ACCOUNT_CREATION_FAILED
    );

    // Balance inquiry
    assert_eq!(
        bank.get_account_balance("2", Role::Customer),
        TransactionStatus::success(1500)
    );
    assert_eq!(
        bank.get_account_balance("20", Role::Customer),
        TransactionStatus::failed()
    );

    // Deposits
    assert_eq!(
        bank.deposit("2", 500, Role::Customer),
        TransactionStatus::success(2000)
    );
    assert_eq!(bank.deposit("20", 500, Role::Customer), TransactionStatus::failed());
    assert_eq!(bank.deposit("2", -500, Role::Customer), TransactionStatus::failed());
    assert_eq!(bank.deposit("2", 500, Role::BankManager), TransactionStatus::failed());

    // Withdrawals
    assert_eq!(
        bank.withdrawal("1", 50, Role::Customer),
        TransactionStatus::success(50)
    );
    assert_eq!(bank.withdrawal("20", 50, Role::Customer), TransactionStatus::failed());
    assert_eq!(bank.withdrawal("2", 2500, Role::Customer), TransactionStatus::failed());
    assert_eq!(bank.withdrawal("2", -50, Role::Customer), TransactionStatus::failed());
    assert_eq!(bank.withdrawal("2", 50, Role::BankManager), TransactionStatus::failed());

    // Transfers
    assert_eq!(
        bank.transfer_fund("1", "2", 50, Role::Customer),
        FundTransferStatus::success(0, 2050)
    );
    assert_eq!(
        bank.transfer_fund("20", "2", 50, Role::Customer),
        FundTransferStatus::failed()
    );
    assert_eq!(
        bank.transfer_fund("2", "20", 50, Role::Customer),
        FundTransferStatus::failed()
    );
    assert_eq!(
        bank.transfer_fund("2", "1", 5000, Role::Customer),
        FundTransferStatus::failed()
    );
    assert_eq!(
        bank.transfer_fund("2", "1", -50, Role::Customer),
        FundTransferStatus::failed()
    );
    assert_eq!(
        bank.transfer_fund("2", "1", 50, Role::BankManager),
        FundTransferStatus::failed()
    );

    // Manager report
    assert_eq!(
        bank.get_total_bank_balance(Role::BankManager),
        TransactionStatus::success(2550)
    );
    assert_eq!(
        bank.get_total_bank_balance(Role::Customer),
        TransactionStatus::failed()
    );

    // Only the successful operations left a trace
    let types: Vec<_> = bank
        .transactions()
        .iter()
        .skip(2)
        .map(|t| (t.account_number.as_str(), t.transaction_type, t.amount))
        .collect();
    assert_eq!(
        types,
        vec![
            ("3", TransactionType::AccountOpening, 500),
            ("2", TransactionType::Deposit, 500),
            ("1", TransactionType::Withdrawal, -50),
            ("1", TransactionType::FundTransfer, -50),
            ("2", TransactionType::FundTransfer, 50),
        ]
    );
    assert!(bank.check_integrity().is_healthy());

    Ok(())
}

#[test]
fn test_balance_inquiry_is_open_to_managers() -> Result<()> {
    let (mut ledger, mut log) = StandardBank::ledger();
    let bank = BankService::new(&mut ledger, &mut log);

    assert_eq!(
        bank.get_account_balance("1", Role::BankManager),
        TransactionStatus::success(100)
    );

    Ok(())
}

#[test]
fn test_account_numbers_increase_from_maximum() -> Result<()> {
    let (mut ledger, mut log) = StandardBank::ledger();
    let mut bank = BankService::new(&mut ledger, &mut log);

    let numbers: Vec<_> = ["Ada", "Grace", "Alan"]
        .iter()
        .map(|name| bank.create_user_account(name, 10, Role::Customer))
        .collect();

    assert_eq!(numbers, vec!["3", "4", "5"]);
    assert_eq!(bank.accounts().len(), 5);
    assert_eq!(
        bank.transactions().last(),
        Some(&Transaction::account_opening("5", 10))
    );

    Ok(())
}

#[test]
fn test_first_account_on_empty_ledger() -> Result<()> {
    let mut ledger = Vec::new();
    let mut log = Vec::new();
    let mut bank = BankService::new(&mut ledger, &mut log);

    assert_eq!(bank.create_user_account("Ada", 100, Role::Customer), "1");
    assert_eq!(bank.create_user_account("Grace", 100, Role::Customer), "2");
    assert_eq!(
        bank.get_total_bank_balance(Role::BankManager),
        TransactionStatus::success(200)
    );
    assert_eq!(ledger.len(), 2);
    assert_eq!(log.len(), 2);

    Ok(())
}

#[test]
fn test_caller_keeps_ownership_of_collections() -> Result<()> {
    let (mut ledger, mut log) = StandardBank::ledger();

    {
        let mut bank = BankService::new(&mut ledger, &mut log);
        bank.deposit("1", 400, Role::Customer);
    }
    {
        let mut bank = BankService::new(&mut ledger, &mut log);
        bank.transfer_fund("1", "2", 500, Role::Customer);
    }

    assert_eq!(ledger[0].balance, 0);
    assert_eq!(ledger[1].balance, 2000);
    assert_eq!(ledger_total(&ledger), 2000);
    assert_eq!(log.len(), 5);

    Ok(())
}
