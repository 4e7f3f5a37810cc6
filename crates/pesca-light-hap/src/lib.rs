//! Platform support for the HAP stack: keys, pairings and protocol
//! counters. Hardware-free, so the storage semantics are tested on the
//! host.
#![cfg_attr(not(test), no_std)]

use chacha20::{
    ChaCha8,
    cipher::{KeyIvInit, StreamCipher},
};
use heapless::FnvIndexMap;
use log::debug;

use micro_hap::ble::broadcast::BleBroadcastParameters;
use micro_hap::pairing::{ED25519_LTSK, Pairing, PairingId};
use micro_hap::{BleBroadcastInterval, CharId, InterfaceError, PlatformSupport};

const MAX_PAIRINGS: usize = 2;
const MAX_BROADCAST_CONFIGS: usize = 16;

/// Keys, pairings and protocol counters for the HAP stack.
///
/// Everything lives in RAM, so pairings are lost on reboot and the
/// accessory has to be re-added. The long-term secret key is derived from
/// the hardware RNG at boot for the same reason.
pub struct PairStore {
    ed_ltsk: [u8; ED25519_LTSK],
    pairings: FnvIndexMap<PairingId, Pairing, MAX_PAIRINGS>,
    global_state_number: u16,
    config_number: u8,
    broadcast_parameters: BleBroadcastParameters,
    ble_broadcast_config: FnvIndexMap<CharId, BleBroadcastInterval, MAX_BROADCAST_CONFIGS>,
    prng: ChaCha8,
}

impl PairStore {
    pub fn new(key: [u8; 32]) -> Self {
        let nonce = [0u8; 12];
        let mut prng = ChaCha8::new(&key.into(), &nonce.into());

        let mut ed_ltsk = [0u8; ED25519_LTSK];
        prng.apply_keystream(&mut ed_ltsk);

        Self {
            ed_ltsk,
            pairings: FnvIndexMap::new(),
            global_state_number: 1,
            config_number: 1,
            broadcast_parameters: BleBroadcastParameters::default(),
            ble_broadcast_config: FnvIndexMap::new(),
            prng,
        }
    }
}

impl PlatformSupport for PairStore {
    fn get_time(&self) -> embassy_time::Instant {
        embassy_time::Instant::now()
    }

    async fn get_ltsk(&self) -> [u8; ED25519_LTSK] {
        self.ed_ltsk
    }

    async fn fill_random(&mut self, buffer: &mut [u8]) {
        self.prng.apply_keystream(buffer);
    }

    async fn store_pairing(&mut self, pairing: &Pairing) -> Result<(), InterfaceError> {
        debug!("hap: storing pairing");
        // Updating a known controller always succeeds, a new one can hit
        // the capacity limit. The write is refused, not fatal.
        self.pairings
            .insert(pairing.id, *pairing)
            .map_err(|_| InterfaceError::CharacteristicWriteInvalid)?;
        Ok(())
    }

    async fn get_pairing(&mut self, id: &PairingId) -> Result<Option<Pairing>, InterfaceError> {
        Ok(self.pairings.get(id).copied())
    }

    async fn remove_pairing(&mut self, id: &PairingId) -> Result<(), InterfaceError> {
        let _ = self.pairings.remove(id);
        Ok(())
    }

    async fn is_paired(&mut self) -> Result<bool, InterfaceError> {
        Ok(!self.pairings.is_empty())
    }

    async fn get_global_state_number(&self) -> Result<u16, InterfaceError> {
        Ok(self.global_state_number)
    }

    async fn set_global_state_number(&mut self, value: u16) -> Result<(), InterfaceError> {
        self.global_state_number = value;
        Ok(())
    }

    async fn get_config_number(&self) -> Result<u8, InterfaceError> {
        Ok(self.config_number)
    }

    async fn set_config_number(&mut self, value: u8) -> Result<(), InterfaceError> {
        self.config_number = value;
        Ok(())
    }

    async fn get_ble_broadcast_parameters(
        &self,
    ) -> Result<BleBroadcastParameters, InterfaceError> {
        Ok(self.broadcast_parameters)
    }

    async fn set_ble_broadcast_parameters(
        &mut self,
        params: &BleBroadcastParameters,
    ) -> Result<(), InterfaceError> {
        self.broadcast_parameters = *params;
        Ok(())
    }

    async fn set_ble_broadcast_configuration(
        &mut self,
        char_id: CharId,
        configuration: BleBroadcastInterval,
    ) -> Result<(), InterfaceError> {
        if configuration == BleBroadcastInterval::Disabled {
            self.ble_broadcast_config.remove(&char_id);
        } else {
            let _ = self.ble_broadcast_config.insert(char_id, configuration);
        }
        Ok(())
    }

    async fn get_ble_broadcast_configuration(
        &mut self,
        char_id: CharId,
    ) -> Result<Option<BleBroadcastInterval>, InterfaceError> {
        Ok(self.ble_broadcast_config.get(&char_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_hap::pairing::PairingPublicKey;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn pairing(n: u8) -> Pairing {
        let mut id = *b"00000000-0000-0000-0000-000000000000";
        id[34] = b'0' + n / 10;
        id[35] = b'0' + n % 10;
        Pairing {
            id: PairingId::parse_str(&id).unwrap(),
            public_key: PairingPublicKey([n; 32]),
            permissions: 1,
        }
    }

    #[test]
    fn store_pairing_refuses_when_full() {
        init();
        let mut support = PairStore::new([7u8; 32]);
        smol::block_on(async {
            support.store_pairing(&pairing(1)).await.unwrap();
            support.store_pairing(&pairing(2)).await.unwrap();
            // Updates to an already stored controller still go through.
            support.store_pairing(&pairing(2)).await.unwrap();
            // A third controller is refused, the stored pairings stay.
            assert!(support.store_pairing(&pairing(3)).await.is_err());
            assert!(support.get_pairing(&pairing(1).id).await.unwrap().is_some());
            assert!(support.get_pairing(&pairing(2).id).await.unwrap().is_some());
            assert!(support.get_pairing(&pairing(3).id).await.unwrap().is_none());
            assert!(support.is_paired().await.unwrap());
        });
    }

    #[test]
    fn removed_pairings_free_a_slot() {
        init();
        let mut support = PairStore::new([7u8; 32]);
        smol::block_on(async {
            support.store_pairing(&pairing(1)).await.unwrap();
            support.store_pairing(&pairing(2)).await.unwrap();
            support.remove_pairing(&pairing(1).id).await.unwrap();
            support.store_pairing(&pairing(3)).await.unwrap();
            assert!(support.get_pairing(&pairing(1).id).await.unwrap().is_none());
            assert!(support.get_pairing(&pairing(3).id).await.unwrap().is_some());
        });
    }

    #[test]
    fn ltsk_is_stable_per_seed() {
        init();
        smol::block_on(async {
            let a = PairStore::new([1u8; 32]).get_ltsk().await;
            let b = PairStore::new([1u8; 32]).get_ltsk().await;
            let c = PairStore::new([2u8; 32]).get_ltsk().await;
            assert_eq!(a, b);
            assert_ne!(a, c);
        });
    }
}
