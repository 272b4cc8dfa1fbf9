// Path: crates/vm-mock/tests/contract.rs
//! End-to-end contract flow over the mock host: endpoint dispatch, typed
//! argument loading, payment and ownership guards, events, cross-contract
//! calls, and the generated ABI.

use std::panic::{catch_unwind, AssertUnwindSafe};

use keel_codec::{MultiValueEncoded, OptionalValue, TopDecode, TopEncode};
use keel_contract_sdk::api::CryptoApi;
use keel_contract_sdk::contract::ArgBuffer;
use keel_contract_sdk::storage::{MapMapper, SetMapper, SingleValueMapper};
use keel_contract_sdk::{
    keel_contract, Address, BigUint, Buffer, ContractContext, TokenIdentifier, VmApi,
};
use keel_vm_mock::MockVm;

struct StakingContract<A: VmApi> {
    ctx: ContractContext<A>,
}

impl<A: VmApi> StakingContract<A> {
    fn new(api: A) -> Self {
        Self {
            ctx: ContractContext::new(api),
        }
    }

    fn context(&self) -> &ContractContext<A> {
        &self.ctx
    }

    fn stake_token(&self) -> SingleValueMapper<A, TokenIdentifier> {
        self.ctx.storage(b"stake_token")
    }

    fn total_staked(&self) -> SingleValueMapper<A, BigUint> {
        self.ctx.storage(b"total_staked")
    }

    fn stakes(&self) -> MapMapper<A, Address, BigUint> {
        self.ctx.storage(b"stakes")
    }

    fn whitelist(&self) -> SetMapper<A, Address> {
        self.ctx.storage(b"whitelist")
    }

    fn pending_unstake(&self) -> SingleValueMapper<A, BigUint> {
        self.ctx.storage(b"pending_unstake")
    }
}

#[keel_contract]
impl<A: VmApi> StakingContract<A> {
    #[init]
    fn init(&self, token: TokenIdentifier) {
        self.ctx.require(token.is_valid(), "invalid token identifier");
        self.stake_token().set(&token);
    }

    #[endpoint]
    #[payable]
    fn stake(&self) {
        let (token, amount) = match self.ctx.call_value().token_payment() {
            Some(payment) => payment,
            None => self.ctx.signal_error("token payment required"),
        };
        self.ctx
            .require(token == self.stake_token().get(), "wrong staking token");
        self.ctx.require(!amount.is_zero(), "amount must be > 0");

        let caller = self.ctx.blockchain().caller();
        let stakes = self.stakes();
        match stakes.entry(caller) {
            keel_contract_sdk::storage::Entry::Occupied(entry) => {
                entry.update(|staked| *staked += &amount);
            }
            keel_contract_sdk::storage::Entry::Vacant(entry) => {
                entry.insert(amount.clone());
            }
        }
        self.total_staked().update(|total| *total += &amount);

        self.ctx.emit_event(
            "stake",
            &[self.ctx.topic(&caller)],
            amount.to_bytes_be(),
        );
    }

    #[endpoint]
    fn unstake(&self, amount: BigUint) {
        self.ctx.require(!amount.is_zero(), "amount must be > 0");
        let caller = self.ctx.blockchain().caller();
        let staked = self.stakes().get(&caller).unwrap_or_default();
        self.ctx.require(staked >= amount, "not enough staked");

        let remaining = staked - amount.clone();
        if remaining.is_zero() {
            self.stakes().remove(&caller);
        } else {
            self.stakes().insert(&caller, &remaining);
        }
        self.total_staked().update(|total| *total -= &amount);

        self.ctx
            .send()
            .direct_token(&caller, &self.stake_token().get(), &amount);
    }

    #[view("stakedAmount")]
    fn staked_amount(&self, user: Address) -> BigUint {
        self.stakes().get(&user).unwrap_or_default()
    }

    #[view("totalStaked")]
    fn total(&self) -> BigUint {
        self.total_staked().get()
    }

    #[endpoint]
    #[only_owner]
    fn add_to_whitelist(&self, users: MultiValueEncoded<Address>) -> u32 {
        let users = match users.decode_all() {
            Ok(users) => users,
            Err(_) => self.ctx.signal_error("malformed address list"),
        };
        let whitelist = self.whitelist();
        let mut added = 0u32;
        for user in &users {
            if whitelist.insert(user) {
                added += 1;
            }
        }
        added
    }

    #[view("isWhitelisted")]
    fn is_whitelisted(&self, user: Address, strict: OptionalValue<bool>) -> bool {
        let listed = self.whitelist().contains(&user);
        match strict.into_option() {
            Some(true) => listed && !self.stakes().get(&user).unwrap_or_default().is_zero(),
            _ => listed,
        }
    }

    #[endpoint]
    fn claim_signed(&self, message: Buffer, signature: Buffer) {
        let caller = self.ctx.blockchain().caller();
        let valid = self.ctx.api().verify_ed25519(
            caller.as_bytes(),
            message.as_bytes(),
            signature.as_bytes(),
        );
        self.ctx.require(valid, "invalid signature");
    }

    #[endpoint]
    fn query_pool_price(&self, pool: Address) -> BigUint {
        let results = self.ctx.send().execute_on_dest(
            &pool,
            &BigUint::zero(),
            "getPrice",
            &ArgBuffer::new(),
        );
        match results.first() {
            Some(bytes) => BigUint::from_bytes_be(bytes),
            None => self.ctx.signal_error("pool returned nothing"),
        }
    }

    #[endpoint]
    fn unstake_via_pool(&self, pool: Address, amount: BigUint) {
        let caller = self.ctx.blockchain().caller();
        let staked = self.stakes().get(&caller).unwrap_or_default();
        self.ctx.require(staked >= amount, "not enough staked");

        // persist everything the callback will need *before* the async
        // dispatch terminates this execution
        self.pending_unstake().set(&amount);

        let mut args = ArgBuffer::new();
        if args.push_arg(&amount).is_err() {
            self.ctx.signal_error("argument encode failed");
        }
        self.ctx
            .send()
            .async_call(&pool, &BigUint::zero(), "withdraw", &args);
    }
}

const TOKEN: &[u8] = b"STAKE-1a2b3c";

fn setup() -> (MockVm, StakingContract<MockVm>, Address, Address) {
    let vm = MockVm::new();
    let owner = Address::new([0xAA; 32]);
    let alice = Address::new([0x01; 32]);
    let contract_address = Address::new([0xCC; 32]);
    vm.set_owner(owner);
    vm.set_contract_address(contract_address);
    vm.set_caller(owner);

    let contract = StakingContract::new(vm.clone());
    vm.set_args(vec![TOKEN.to_vec()]);
    assert!(contract.dispatch("init"));
    (vm, contract, owner, alice)
}

#[test]
fn init_stores_the_token() {
    let (vm, contract, _, _) = setup();
    assert_eq!(
        contract.stake_token().get(),
        TokenIdentifier::from_bytes(TOKEN)
    );
    assert_eq!(vm.storage_raw(b"stake_token"), TOKEN.to_vec());
}

#[test]
#[should_panic(expected = "invalid token identifier")]
fn init_rejects_a_malformed_token() {
    let vm = MockVm::new();
    let contract = StakingContract::new(vm.clone());
    vm.set_args(vec![b"bad token".to_vec()]);
    contract.dispatch("init");
}

#[test]
fn stake_and_unstake_roundtrip() {
    let (vm, contract, _, alice) = setup();

    vm.set_caller(alice);
    vm.set_args(vec![]);
    vm.set_token_payment(TOKEN, BigUint::from_u64(500));
    assert!(contract.dispatch("stake"));

    assert_eq!(
        contract.stakes().get(&alice),
        Some(BigUint::from_u64(500))
    );
    assert_eq!(contract.total_staked().get(), BigUint::from_u64(500));

    // the stake event carries the caller topic and the amount payload
    let logs = vm.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].topics[0], b"stake".to_vec());
    assert_eq!(logs[0].topics[1], alice.to_vec());
    assert_eq!(logs[0].data, BigUint::from_u64(500).to_bytes_be());

    // second stake accumulates instead of overwriting
    vm.set_args(vec![]);
    vm.set_token_payment(TOKEN, BigUint::from_u64(100));
    assert!(contract.dispatch("stake"));
    assert_eq!(
        contract.stakes().get(&alice),
        Some(BigUint::from_u64(600))
    );

    // fund the contract so the unstake transfer can settle
    let contract_address = Address::new([0xCC; 32]);
    vm.set_token_balance(contract_address, TOKEN, BigUint::from_u64(600));

    vm.clear_payment();
    vm.set_args(vec![BigUint::from_u64(200).top_encode().unwrap()]);
    assert!(contract.dispatch("unstake"));

    assert_eq!(
        contract.stakes().get(&alice),
        Some(BigUint::from_u64(400))
    );
    assert_eq!(contract.total_staked().get(), BigUint::from_u64(400));
    assert_eq!(vm.token_balance_of(&alice, TOKEN), BigUint::from_u64(200));

    let transfers = vm.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].token, Some(TOKEN.to_vec()));
    assert_eq!(transfers[0].amount, BigUint::from_u64(200));
}

#[test]
#[should_panic(expected = "wrong staking token")]
fn stake_rejects_the_wrong_token() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![]);
    vm.set_token_payment(b"OTHER-ffffff", BigUint::from_u64(5));
    contract.dispatch("stake");
}

#[test]
#[should_panic(expected = "not enough staked")]
fn unstake_requires_sufficient_stake() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![BigUint::from_u64(1).top_encode().unwrap()]);
    contract.dispatch("unstake");
}

#[test]
#[should_panic(expected = "endpoint is not payable")]
fn non_payable_endpoint_rejects_payment() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![BigUint::from_u64(1).top_encode().unwrap()]);
    vm.set_call_value(BigUint::from_u64(10));
    contract.dispatch("unstake");
}

#[test]
#[should_panic(expected = "caller is not the contract owner")]
fn owner_only_endpoint_rejects_strangers() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![alice.to_vec()]);
    contract.dispatch("add_to_whitelist");
}

#[test]
fn variadic_endpoint_consumes_all_remaining_arguments() {
    let (vm, contract, owner, _) = setup();
    vm.set_caller(owner);

    let users: Vec<Address> = (1..=3u8).map(|i| Address::new([i; 32])).collect();
    vm.set_args(users.iter().map(|u| u.to_vec()).collect());
    assert!(contract.dispatch("add_to_whitelist"));

    // result slot carries the number of newly added users
    let results = vm.take_results();
    assert_eq!(results, vec![vec![3u8]]);
    assert_eq!(contract.whitelist().len(), 3);

    // duplicates are not re-added
    vm.set_args(vec![users[0].to_vec()]);
    assert!(contract.dispatch("add_to_whitelist"));
    assert_eq!(vm.take_results(), vec![Vec::<u8>::new()]);
    assert_eq!(contract.whitelist().len(), 3);
}

#[test]
fn optional_argument_may_be_omitted() {
    let (vm, contract, owner, alice) = setup();
    vm.set_caller(owner);
    vm.set_args(vec![alice.to_vec()]);
    assert!(contract.dispatch("add_to_whitelist"));
    vm.take_results();

    // omitted optional
    vm.set_args(vec![alice.to_vec()]);
    assert!(contract.dispatch("isWhitelisted"));
    assert_eq!(vm.take_results(), vec![vec![1u8]]);

    // supplied optional: strict mode requires a live stake
    vm.set_args(vec![alice.to_vec(), vec![1u8]]);
    assert!(contract.dispatch("isWhitelisted"));
    assert_eq!(vm.take_results(), vec![Vec::<u8>::new()]);
}

#[test]
fn view_results_come_back_top_encoded() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![]);
    vm.set_token_payment(TOKEN, BigUint::from_u64(999));
    assert!(contract.dispatch("stake"));

    vm.clear_payment();
    vm.set_args(vec![alice.to_vec()]);
    assert!(contract.dispatch("stakedAmount"));
    let results = vm.take_results();
    assert_eq!(results, vec![vec![0x03, 0xE7]]);

    let decoded = BigUint::top_decode(&results[0]).unwrap();
    assert_eq!(decoded, BigUint::from_u64(999));
}

#[test]
fn unknown_endpoint_is_not_dispatched() {
    let (_, contract, _, _) = setup();
    assert!(!contract.dispatch("does_not_exist"));
}

#[test]
#[should_panic(expected = "too many arguments")]
fn surplus_arguments_abort_the_call() {
    let (vm, contract, _, _) = setup();
    vm.set_args(vec![vec![1], vec![2]]);
    contract.dispatch("totalStaked");
}

#[test]
#[should_panic(expected = "argument decode error")]
fn malformed_argument_aborts_the_call() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    // 31 bytes cannot be an address
    vm.set_args(vec![vec![0u8; 31]]);
    contract.dispatch("stakedAmount");
}

#[test]
fn signature_gate_uses_the_crypto_primitive() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.register_valid_signature(alice.as_bytes(), b"claim:42", b"sig-ok");

    vm.set_args(vec![b"claim:42".to_vec(), b"sig-ok".to_vec()]);
    assert!(contract.dispatch("claim_signed"));

    let bad = catch_unwind(AssertUnwindSafe(|| {
        vm.set_args(vec![b"claim:42".to_vec(), b"sig-bad".to_vec()]);
        contract.dispatch("claim_signed");
    }));
    assert!(bad.is_err());
}

#[test]
fn synchronous_call_returns_programmed_results() {
    let (vm, contract, _, alice) = setup();
    let pool = Address::new([0xBB; 32]);
    vm.program_sync_call(pool, "getPrice", vec![BigUint::from_u64(777).top_encode().unwrap()]);

    vm.set_caller(alice);
    vm.set_args(vec![pool.to_vec()]);
    assert!(contract.dispatch("query_pool_price"));
    assert_eq!(vm.take_results(), vec![vec![0x03, 0x09]]);

    let calls = vm.sync_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to, pool);
    assert_eq!(calls[0].endpoint, b"getPrice".to_vec());
}

#[test]
fn async_call_persists_state_before_terminating() {
    let (vm, contract, _, alice) = setup();
    vm.set_caller(alice);
    vm.set_args(vec![]);
    vm.set_token_payment(TOKEN, BigUint::from_u64(300));
    assert!(contract.dispatch("stake"));
    vm.clear_payment();

    let pool = Address::new([0xBB; 32]);
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        vm.set_args(vec![
            pool.to_vec(),
            BigUint::from_u64(120).top_encode().unwrap(),
        ]);
        contract.dispatch("unstake_via_pool");
    }));
    // the async dispatch terminates the execution
    assert!(outcome.is_err());

    // but everything the callback needs was persisted first
    assert_eq!(
        contract.pending_unstake().get(),
        BigUint::from_u64(120)
    );
    let calls = vm.async_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to, pool);
    assert_eq!(calls[0].endpoint, b"withdraw".to_vec());
    assert_eq!(
        calls[0].args,
        vec![BigUint::from_u64(120).top_encode().unwrap()]
    );
}

#[test]
fn generated_abi_describes_every_endpoint() {
    let abi = StakingContract::<MockVm>::contract_abi();
    assert!(abi.validate().is_ok());
    assert_eq!(abi.name, "StakingContract");

    let constructor = abi.constructor.as_ref().expect("constructor");
    assert_eq!(constructor.inputs.len(), 1);
    assert_eq!(constructor.inputs[0].type_name, "TokenIdentifier");

    let stake = abi
        .endpoints
        .iter()
        .find(|e| e.name == "stake")
        .expect("stake endpoint");
    assert!(stake.flags.contains(keel_abi::EndpointFlags::PAYABLE));

    let whitelist = abi
        .endpoints
        .iter()
        .find(|e| e.name == "add_to_whitelist")
        .expect("whitelist endpoint");
    assert!(whitelist.flags.contains(keel_abi::EndpointFlags::ONLY_OWNER));
    assert_eq!(whitelist.inputs[0].type_name, "variadic<Address>");
    assert!(whitelist.inputs[0].multi_arg);

    let is_whitelisted = abi
        .endpoints
        .iter()
        .find(|e| e.name == "isWhitelisted")
        .expect("view");
    assert_eq!(is_whitelisted.mutability, keel_abi::EndpointMutability::Readonly);
    assert_eq!(is_whitelisted.inputs[1].type_name, "optional<bool>");

    let json = abi.to_json();
    assert!(json.contains("\"variadic<Address>\""));
    assert!(json.contains("\"BigUint\""));
}
