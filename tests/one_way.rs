mod common;

mod one_way {
    use crate::common::check_one_way;

    mod without_prologue {
        use super::*;
        const P: &[u8] = b"";

        #[test]
        fn n() {
            check_one_way("Noise_N_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn k() {
            check_one_way("Noise_K_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn x() {
            check_one_way("Noise_X_25519_ChaChaPoly_SHA256", P);
        }
    }

    mod with_prologue {
        use super::*;
        const P: &[u8] = b"the prologue";

        #[test]
        fn n() {
            check_one_way("Noise_N_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn x() {
            check_one_way("Noise_X_25519_AESGCM_SHA512", P);
        }
    }

    mod with_psks {
        use super::*;
        const P: &[u8] = b"";

        #[test]
        fn npsk0() {
            check_one_way("Noise_Npsk0_25519_ChaChaPoly_BLAKE2s", P);
        }
        #[test]
        fn kpsk0() {
            check_one_way("Noise_Kpsk0_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xpsk1() {
            check_one_way("Noise_Xpsk1_25519_ChaChaPoly_SHA256", P);
        }
    }
}
