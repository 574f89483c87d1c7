mod common;

mod two_way {
    use crate::common::check_interactive;

    mod without_prologue {
        use super::*;
        const P: &[u8] = b"";

        #[test]
        fn nn() {
            check_interactive("Noise_NN_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn nk() {
            check_interactive("Noise_NK_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn nx() {
            check_interactive("Noise_NX_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xn() {
            check_interactive("Noise_XN_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xk() {
            check_interactive("Noise_XK_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xx() {
            check_interactive("Noise_XX_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn kn() {
            check_interactive("Noise_KN_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn kk() {
            check_interactive("Noise_KK_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn kx() {
            check_interactive("Noise_KX_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn in_() {
            check_interactive("Noise_IN_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn ik() {
            check_interactive("Noise_IK_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn ix() {
            check_interactive("Noise_IX_25519_ChaChaPoly_SHA256", P);
        }
    }

    mod with_prologue {
        use super::*;
        const P: &[u8] = b"the prologue";

        #[test]
        fn nn() {
            check_interactive("Noise_NN_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xx() {
            check_interactive("Noise_XX_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn kk() {
            check_interactive("Noise_KK_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn ik() {
            check_interactive("Noise_IK_25519_ChaChaPoly_SHA256", P);
        }
    }

    mod with_psks {
        use super::*;
        const P: &[u8] = b"";

        #[test]
        fn nnpsk0() {
            check_interactive("Noise_NNpsk0_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn nnpsk2() {
            check_interactive("Noise_NNpsk2_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn kkpsk2() {
            check_interactive("Noise_KKpsk2_25519_AESGCM_SHA512", P);
        }
        #[test]
        fn xxpsk3() {
            check_interactive("Noise_XXpsk3_25519_ChaChaPoly_SHA256", P);
        }
        #[test]
        fn xxpsk0psk3() {
            check_interactive("Noise_XXpsk0psk3_25519_ChaChaPoly_BLAKE2s", P);
        }
    }

    mod other_suites {
        use super::*;
        const P: &[u8] = b"";

        #[test]
        fn xx_aesgcm_sha256() {
            check_interactive("Noise_XX_25519_AESGCM_SHA256", P);
        }
        #[test]
        fn xx_chachapoly_sha512() {
            check_interactive("Noise_XX_25519_ChaChaPoly_SHA512", P);
        }
        #[test]
        fn xx_chachapoly_blake2s() {
            check_interactive("Noise_XX_25519_ChaChaPoly_BLAKE2s", P);
        }
        #[test]
        fn xx_aesgcm_blake2b() {
            check_interactive("Noise_XX_25519_AESGCM_BLAKE2b", P);
        }
        #[test]
        fn ik_aesgcm_sha256() {
            check_interactive("Noise_IK_25519_AESGCM_SHA256", P);
        }
    }
}
