use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub duration_seconds: u64,
    pub lockin_seconds: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsAddedEvent {
    pub funder: Address,
    pub amount: i128,
    pub start_time: u64,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub amount: i128,
}

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    duration_seconds: u64,
    lockin_seconds: u64,
) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        token,
        duration_seconds,
        lockin_seconds,
    };
    env.events().publish(topics, data);
}

pub fn publish_rewards_added(env: &Env, funder: Address, amount: i128, start_time: u64, end_time: u64) {
    let topics = (symbol_short!("FUNDED"), funder.clone());
    let data = RewardsAddedEvent {
        funder,
        amount,
        start_time,
        end_time,
    };
    env.events().publish(topics, data);
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, total_staked: i128, unlock_time: u64) {
    let topics = (symbol_short!("STAKED"), staker.clone());
    let data = StakedEvent {
        staker,
        amount,
        total_staked,
        unlock_time,
    };
    env.events().publish(topics, data);
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    let topics = (symbol_short!("UNSTAKED"), staker.clone());
    let data = UnstakedEvent {
        staker,
        amount,
        total_staked,
    };
    env.events().publish(topics, data);
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, amount: i128) {
    let topics = (symbol_short!("CLAIMED"), staker.clone());
    let data = RewardsClaimedEvent { staker, amount };
    env.events().publish(topics, data);
}
