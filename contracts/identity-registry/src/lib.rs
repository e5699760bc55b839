/*!
 * Identity Registry Smart Contract
 *
 * Allow-list of the identities permitted to take part in cross-border trades.
 *
 * - Registration is centralized: a single administrator, injected at initialization,
 *   admits participants after off-chain KYC
 * - Every admitted participant is recorded as verified with a fixed role
 * - Verification and role queries are side-effect free and consumed by the trade engine
 * - The administrator can hand over control through an explicit, audited transfer
 */

#![no_std]

mod types;


use soroban_sdk::{contract, contractimpl, Address, Env, String};

pub use types::{Error, Participant, Role, DataKey, ADMIN_TRANSFERRED, PARTICIPANT_REGISTERED};

#[contract]
pub struct IdentityRegistryContract;

#[contractimpl]
impl IdentityRegistryContract {
    /// Initializes the registry with its administrator.
    ///
    /// The administrator is the only identity allowed to register participants.
    ///
    /// # Errors
    /// - AlreadyInitialized: If the registry already has an administrator
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    fn _require_admin(env: &Env) -> Result<Address, Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(admin)
    }

    /// Admits a participant to the trade system.
    ///
    /// The record is stored as verified, stamped with the current ledger time.
    /// Registering an address twice is rejected rather than overwriting the first
    /// record.
    ///
    /// # Arguments
    /// * `address` - The identity being admitted
    /// * `name` - Display name of the participant
    /// * `role` - Exporter, Importer or Admin
    ///
    /// # Errors
    /// - NotInitialized: If the registry has no administrator
    /// - AlreadyRegistered: If the address already has a record
    pub fn register_participant(
        env: Env,
        address: Address,
        name: String,
        role: Role,
    ) -> Result<(), Error> {
        Self::_require_admin(&env)?;

        let key = DataKey::Participant(address.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::AlreadyRegistered);
        }

        let participant = Participant {
            address: address.clone(),
            name: name.clone(),
            role,
            is_verified: true,
            registration_date: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&key, &participant);

        env.events()
            .publish((PARTICIPANT_REGISTERED, address), (name, role));

        Ok(())
    }

    /// Returns whether the address belongs to a verified participant.
    /// Unknown addresses are simply not verified.
    pub fn is_verified(env: Env, address: Address) -> bool {
        env.storage()
            .persistent()
            .get::<_, Participant>(&DataKey::Participant(address))
            .map(|participant| participant.is_verified)
            .unwrap_or(false)
    }

    /// Returns the role of a registered participant.
    ///
    /// # Errors
    /// - NotRegistered: If the address has no record
    pub fn get_role(env: Env, address: Address) -> Result<Role, Error> {
        Self::get_participant(env, address).map(|participant| participant.role)
    }

    /// Returns the full participant record.
    ///
    /// # Errors
    /// - NotRegistered: If the address has no record
    pub fn get_participant(env: Env, address: Address) -> Result<Participant, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Participant(address))
            .ok_or(Error::NotRegistered)
    }

    /// Returns the administrator identity, for client-side permission checks.
    pub fn owner(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    /// Hands registry administration to a new identity.
    ///
    /// Without this, losing the administrator key would halt registration for good.
    /// The change is authorized by the current administrator and recorded as an
    /// event carrying both identities.
    ///
    /// # Errors
    /// - NotInitialized: If the registry has no administrator
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        let old_admin = Self::_require_admin(&env)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        env.events()
            .publish((ADMIN_TRANSFERRED, old_admin), new_admin);
        Ok(())
    }
}
