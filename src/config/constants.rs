// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known type tags and identifiers
//!
//! This module centralizes the Move type tags, framework functions and native
//! asset identifiers that the reconciliation engine matches against.

/// Default node REST endpoint (Aptos mainnet)
pub const DEFAULT_NODE_URL: &str = "https://api.mainnet.aptoslabs.com/v1";

/// Move resource and event type tags
pub mod type_tags {
    /// Resource carrying an object's current owner
    pub const OBJECT_CORE: &str = "0x1::object::ObjectCore";

    /// Resource holding a fungible asset balance
    ///
    /// Matched by substring as well, since concurrent stores carry the same
    /// module path with additional type parameters.
    pub const FUNGIBLE_STORE: &str = "0x1::fungible_asset::FungibleStore";

    /// Module-qualified name used for substring matching of store resources
    pub const FUNGIBLE_STORE_SUFFIX: &str = "fungible_asset::FungibleStore";

    /// Emitted when a fungible store's balance decreases
    pub const WITHDRAW_EVENT: &str = "0x1::fungible_asset::Withdraw";

    /// Emitted when a fungible store's balance increases
    pub const DEPOSIT_EVENT: &str = "0x1::fungible_asset::Deposit";

    /// Type argument for fungible asset metadata view functions
    pub const FUNGIBLE_METADATA: &str = "0x1::fungible_asset::Metadata";

    /// Legacy coin info resource, parameterized by the coin type
    pub const COIN_INFO: &str = "0x1::coin::CoinInfo";

    /// Per-account registry of published packages and their metadata
    pub const PACKAGE_REGISTRY: &str = "0x1::code::PackageRegistry";
}

/// Native asset identifiers
pub mod native {
    /// Metadata address of the native fungible asset
    pub const ASSET: &str = "0xa";

    /// Legacy coin type of the native asset
    pub const COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";

    /// Display symbol of the native asset
    pub const SYMBOL: &str = "APT";

    /// Decimal count of the native asset
    pub const DECIMALS: u8 = 8;
}

/// Framework module coordinates used for view-function lookups
pub mod framework {
    /// Address of the Aptos framework
    pub const ADDRESS: &str = "0x1";

    /// Module exposing fungible asset metadata view functions
    pub const FUNGIBLE_ASSET_MODULE: &str = "fungible_asset";
}

/// Entry functions recognized as legacy coin or primary-store transfers
pub mod entry_functions {
    /// `aptos_account::transfer_coins<T>(to, amount)`
    pub const TRANSFER_COINS: &str = "0x1::aptos_account::transfer_coins";

    /// `coin::transfer<T>(to, amount)`
    pub const COIN_TRANSFER: &str = "0x1::coin::transfer";

    /// `primary_fungible_store::transfer(metadata, to, amount)`
    pub const PRIMARY_STORE_TRANSFER: &str = "0x1::primary_fungible_store::transfer";
}

/// Transaction `type` discriminators returned by the REST API
pub mod transaction_kinds {
    /// Transaction submitted by a user account
    pub const USER: &str = "user_transaction";

    /// Transaction accepted into mempool but not committed
    pub const PENDING: &str = "pending_transaction";
}

/// Write-set change discriminator for resource writes
pub const WRITE_RESOURCE_CHANGE: &str = "write_resource";
