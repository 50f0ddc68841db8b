use anchor_lang::prelude::*;

use crate::errors::LandError;
use crate::state::{hash_leaf, verify_proof, LandCells, Quad, SiblingOrder};

/// One parcel of the presale allowlist. Entries are stored off-chain; only
/// the Merkle root over their leaf hashes is published.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllowlistEntry {
    pub x: u16,
    pub y: u16,
    pub size: u16,
    /// Buyer the parcel is reserved for; `Pubkey::default()` means open to anyone
    pub reserved: Pubkey,
    pub price: u64,
    pub salt: [u8; 32],
}

impl AllowlistEntry {
    pub const ENCODED_LEN: usize = 2 + 2 + 2 + 32 + 8 + 32; // 78 bytes

    /// Canonical leaf encoding: fields in declaration order, integers
    /// little-endian, fixed width.
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0..2].copy_from_slice(&self.x.to_le_bytes());
        out[2..4].copy_from_slice(&self.y.to_le_bytes());
        out[4..6].copy_from_slice(&self.size.to_le_bytes());
        out[6..38].copy_from_slice(self.reserved.as_ref());
        out[38..46].copy_from_slice(&self.price.to_le_bytes());
        out[46..78].copy_from_slice(&self.salt);
        out
    }

    pub fn leaf_hash(&self) -> [u8; 32] {
        hash_leaf(&self.encode())
    }

    pub fn quad(&self) -> Result<Quad> {
        Quad::new(self.x, self.y, self.size)
    }

    pub fn is_open(&self) -> bool {
        self.reserved == Pubkey::default()
    }

    pub fn check_reservation(&self, buyer: &Pubkey) -> Result<()> {
        require!(
            self.is_open() || self.reserved == *buyer,
            LandError::NotReserved
        );
        Ok(())
    }

    /// Recomputes the proof path for this entry and compares it with `root`.
    pub fn verify(&self, proof: &[[u8; 32]], leaf_index: u32, root: &[u8; 32], order: SiblingOrder) -> bool {
        verify_proof(proof, root, &self.leaf_hash(), leaf_index, order)
    }
}

/// A presale round. The root and its sibling order never change after
/// `start_presale`.
#[account]
#[derive(InitSpace)]
pub struct Presale {
    pub round: u32,
    pub merkle_root: [u8; 32],
    pub sibling_order: SiblingOrder,
    /// Cleared by `close_presale`; no purchases after that
    pub active: bool,
    pub entries_claimed: u32,
    pub bump: u8,
}

impl Presale {
    pub const SEED: &'static [u8] = b"presale";
}

/// Consumption flag of one allowlist entry, keyed by presale and leaf hash.
#[account]
#[derive(InitSpace)]
pub struct ClaimReceipt {
    pub presale: Pubkey,
    pub claimed: bool,
    pub buyer: Pubkey,
    pub quad: Quad,
    pub price: u64,
    pub bump: u8,
}

impl ClaimReceipt {
    pub const SEED: &'static [u8] = b"claim";
}

/// Claims the land of an allowlist entry for `buyer` and consumes the entry.
///
/// Checks run in order: round open, entry unconsumed, reservation, proof,
/// then the registry claim. Land and receipt are only written once every
/// check has passed, so a rejected purchase leaves both untouched.
pub fn purchase<L: LandCells>(
    land: &mut L,
    presale: &mut Presale,
    receipt: &mut ClaimReceipt,
    entry: &AllowlistEntry,
    proof: &[[u8; 32]],
    leaf_index: u32,
    buyer: &Pubkey,
) -> Result<Quad> {
    require!(presale.active, LandError::PresaleClosed);
    require!(!receipt.claimed, LandError::AlreadyClaimed);

    entry.check_reservation(buyer)?;
    require!(
        entry.verify(proof, leaf_index, &presale.merkle_root, presale.sibling_order),
        LandError::InvalidProof
    );

    let quad = entry.quad()?;
    let entries_claimed = presale
        .entries_claimed
        .checked_add(1)
        .ok_or(LandError::Overflow)?;

    // A valid proof can still lose to land claimed through another route
    land.claim(&quad, buyer)?;

    receipt.claimed = true;
    receipt.buyer = *buyer;
    receipt.quad = quad;
    receipt.price = entry.price;
    presale.entries_claimed = entries_claimed;

    Ok(quad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{merkle_proof, merkle_root, Coordinate};
    use crate::test_utils::SparseLand;

    fn salt(n: u64) -> [u8; 32] {
        let mut salt = [0u8; 32];
        salt[..8].copy_from_slice(&n.to_le_bytes());
        salt
    }

    fn entry(x: u16, y: u16, size: u16, reserved: Pubkey) -> AllowlistEntry {
        AllowlistEntry {
            x,
            y,
            size,
            reserved,
            price: 100,
            salt: salt(7),
        }
    }

    struct Round {
        entries: Vec<AllowlistEntry>,
        leaves: Vec<[u8; 32]>,
        presale: Presale,
    }

    impl Round {
        fn new(entries: Vec<AllowlistEntry>, order: SiblingOrder) -> Self {
            let leaves: Vec<[u8; 32]> = entries.iter().map(|e| e.leaf_hash()).collect();
            let presale = Presale {
                round: 0,
                merkle_root: merkle_root(&leaves, order).unwrap(),
                sibling_order: order,
                active: true,
                entries_claimed: 0,
                bump: 0,
            };
            Self {
                entries,
                leaves,
                presale,
            }
        }

        fn proof(&self, index: usize) -> Vec<[u8; 32]> {
            merkle_proof(&self.leaves, index, self.presale.sibling_order).unwrap()
        }
    }

    fn empty_receipt() -> ClaimReceipt {
        ClaimReceipt {
            presale: Pubkey::default(),
            claimed: false,
            buyer: Pubkey::default(),
            quad: Quad { x: 0, y: 0, size: 0 },
            price: 0,
            bump: 0,
        }
    }

    fn sample_round(order: SiblingOrder, reserved: Pubkey) -> Round {
        Round::new(
            vec![
                entry(3, 3, 3, Pubkey::default()),
                entry(24, 0, 24, reserved),
                entry(0, 0, 1, Pubkey::default()),
                entry(12, 12, 6, Pubkey::default()),
                entry(100, 100, 1, Pubkey::default()),
            ],
            order,
        )
    }

    #[test]
    fn test_entry_encoding_layout() {
        let reserved = Pubkey::new_unique();
        let e = AllowlistEntry {
            x: 0x0102,
            y: 0x0304,
            size: 3,
            reserved,
            price: 100,
            salt: salt(7),
        };
        let bytes = e.encode();
        assert_eq!(&bytes[0..2], &[0x02, 0x01]);
        assert_eq!(&bytes[2..4], &[0x04, 0x03]);
        assert_eq!(&bytes[4..6], &[3, 0]);
        assert_eq!(&bytes[6..38], reserved.as_ref());
        assert_eq!(&bytes[38..46], &100u64.to_le_bytes());
        assert_eq!(bytes[46], 7);
    }

    #[test]
    fn test_every_field_changes_leaf() {
        let base = entry(3, 3, 3, Pubkey::default());
        let variants = [
            AllowlistEntry { x: 6, ..base },
            AllowlistEntry { y: 6, ..base },
            AllowlistEntry { size: 1, ..base },
            AllowlistEntry { reserved: Pubkey::new_unique(), ..base },
            AllowlistEntry { price: 101, ..base },
            AllowlistEntry { salt: salt(8), ..base },
        ];
        for variant in variants.iter() {
            assert_ne!(variant.leaf_hash(), base.leaf_hash());
        }
    }

    #[test]
    fn test_reservation() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        let open = entry(0, 0, 1, Pubkey::default());
        assert!(open.check_reservation(&alice).is_ok());
        assert!(open.check_reservation(&bob).is_ok());

        let reserved = entry(0, 0, 1, alice);
        assert!(reserved.check_reservation(&alice).is_ok());
        assert_eq!(
            reserved.check_reservation(&bob).unwrap_err(),
            LandError::NotReserved.into()
        );
    }

    #[test]
    fn test_purchase_once_per_entry() {
        let buyer = Pubkey::new_unique();
        let mut round = sample_round(SiblingOrder::Sorted, Pubkey::default());
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[0];
        let proof = round.proof(0);

        let quad = purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 0, &buyer).unwrap();

        assert_eq!(quad, Quad::new(3, 3, 3).unwrap());
        for x in 3..6 {
            for y in 3..6 {
                assert_eq!(land.owner_of(Coordinate::new(x, y)), Some(buyer));
            }
        }
        assert_eq!(land.owner_of(Coordinate::new(6, 6)), None);
        assert!(receipt.claimed);
        assert_eq!(receipt.buyer, buyer);
        assert_eq!(receipt.price, 100);
        assert_eq!(round.presale.entries_claimed, 1);

        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 0, &buyer).unwrap_err(),
            LandError::AlreadyClaimed.into()
        );
        assert_eq!(round.presale.entries_claimed, 1);
    }

    #[test]
    fn test_purchase_reserved_entry() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut round = sample_round(SiblingOrder::LeafIndex, alice);
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[1];
        let proof = round.proof(1);

        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 1, &bob).unwrap_err(),
            LandError::NotReserved.into()
        );
        assert!(!receipt.claimed);
        assert_eq!(land, SparseLand::default());

        purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 1, &alice).unwrap();
        assert_eq!(land.owner_of(Coordinate::new(47, 23)), Some(alice));
    }

    #[test]
    fn test_purchase_rejects_bad_proof() {
        let buyer = Pubkey::new_unique();
        let mut round = sample_round(SiblingOrder::LeafIndex, Pubkey::default());
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[3];

        let mut proof = round.proof(3);
        proof[1][0] ^= 0x01;
        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 3, &buyer).unwrap_err(),
            LandError::InvalidProof.into()
        );

        // Right proof, wrong position
        let proof = round.proof(3);
        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 2, &buyer).unwrap_err(),
            LandError::InvalidProof.into()
        );

        // An entry that was never published
        let forged = AllowlistEntry { price: 1, ..e };
        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &forged, &proof, 3, &buyer).unwrap_err(),
            LandError::InvalidProof.into()
        );

        assert!(!receipt.claimed);
        assert_eq!(round.presale.entries_claimed, 0);
        assert_eq!(land, SparseLand::default());
    }

    #[test]
    fn test_purchase_loses_to_land_claimed_elsewhere() {
        let buyer = Pubkey::new_unique();
        let minter_recipient = Pubkey::new_unique();
        let mut round = sample_round(SiblingOrder::Sorted, Pubkey::default());
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[0];
        let proof = round.proof(0);

        land.claim(&Quad::new(4, 4, 1).unwrap(), &minter_recipient).unwrap();
        let before = land.clone();

        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 0, &buyer).unwrap_err(),
            LandError::AlreadyOwned.into()
        );
        assert_eq!(land, before);
        assert!(!receipt.claimed);
        assert_eq!(round.presale.entries_claimed, 0);
    }

    #[test]
    fn test_purchase_after_close() {
        let buyer = Pubkey::new_unique();
        let mut round = sample_round(SiblingOrder::Sorted, Pubkey::default());
        round.presale.active = false;
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[2];
        let proof = round.proof(2);

        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 2, &buyer).unwrap_err(),
            LandError::PresaleClosed.into()
        );
    }

    #[test]
    fn test_published_entry_with_bad_geometry() {
        let buyer = Pubkey::new_unique();
        let mut round = Round::new(
            vec![
                entry(1, 0, 3, Pubkey::default()),
                entry(0, 0, 1, Pubkey::default()),
            ],
            SiblingOrder::Sorted,
        );
        let mut land = SparseLand::default();
        let mut receipt = empty_receipt();
        let e = round.entries[0];
        let proof = round.proof(0);

        assert_eq!(
            purchase(&mut land, &mut round.presale, &mut receipt, &e, &proof, 0, &buyer).unwrap_err(),
            LandError::InvalidQuad.into()
        );
        assert!(!receipt.claimed);
    }
}
