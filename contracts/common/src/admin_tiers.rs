use soroban_sdk::{contracttype, Address, Env, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
enum TierKey {
    /// Tier held by a single address (persistent).
    Tier(Address),
    /// Every address currently holding a tier (persistent).
    Roster,
    /// The address bootstrapped as the first SuperAdmin (instance).
    Bootstrap,
}

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Admin tier enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy.
///
/// - `SuperAdmin`    – assigns and removes tiers, plus everything below.
/// - `ContractAdmin` – ranks above operators; same circuit-breaker rights.
/// - `OperatorAdmin` – engages and releases the circuit breaker.
///
/// The staking configuration is fixed at initialization, so no tier can
/// change it afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// True if this tier is at least as privileged as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

fn roster(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&TierKey::Roster)
        .unwrap_or(Vec::new(env))
}

fn store_roster(env: &Env, admins: &Vec<Address>) {
    env.storage().persistent().set(&TierKey::Roster, admins);
    env.storage()
        .persistent()
        .extend_ttl(&TierKey::Roster, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Assigns `tier` to `admin` and records the address in the roster.
/// Callers are responsible for authorization.
pub fn grant(env: &Env, admin: &Address, tier: AdminTier) {
    let key = TierKey::Tier(admin.clone());
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut admins = roster(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        store_roster(env, &admins);
    }
}

/// Removes any tier held by `admin`.
pub fn revoke(env: &Env, admin: &Address) {
    env.storage()
        .persistent()
        .remove(&TierKey::Tier(admin.clone()));

    let admins = roster(env);
    if let Some(index) = admins.first_index_of(admin) {
        let mut remaining = admins;
        remaining.remove(index);
        store_roster(env, &remaining);
    }
}

pub fn tier_of(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = TierKey::Tier(admin.clone());
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    tier
}

/// Returns `true` when `caller` holds `min_tier` or higher.
pub fn has_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    tier_of(env, caller).is_some_and(|tier| tier.has_at_least(min_tier))
}

/// Every address currently holding a tier, in grant order.
pub fn list_admins(env: &Env) -> Vec<Address> {
    roster(env)
}

/// Registers the initializing admin as the first SuperAdmin.
pub fn bootstrap(env: &Env, admin: &Address) {
    env.storage().instance().set(&TierKey::Bootstrap, admin);
    grant(env, admin, AdminTier::SuperAdmin);
}

pub fn bootstrap_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TierKey::Bootstrap)
}

/// SuperAdmin-only tier assignment. The caller must already be authenticated.
/// A SuperAdmin cannot move itself to a lower tier, for the same reason it
/// cannot demote itself.
///
/// Returns `false` when the caller is not a SuperAdmin or downgrades itself.
pub fn promote(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !has_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    if caller == target && tier != AdminTier::SuperAdmin {
        return false;
    }
    grant(env, target, tier);
    true
}

/// SuperAdmin-only tier removal. A SuperAdmin cannot demote itself, so the
/// registry always keeps at least one.
///
/// Returns `false` when the caller is not a SuperAdmin or targets itself.
pub fn demote(env: &Env, caller: &Address, target: &Address) -> bool {
    if caller == target || !has_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    revoke(env, target);
    true
}
