mod analysis_tests {
    use libdfpwm_audio::analysis::{fingerprint, fingerprint_hex, mean, peak, rms, settling_index, snr_db};

    #[test]
    fn test_rms_and_peak() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[]), 0);
        assert!((rms(&[3, -4, 3, -4]) - 12.5f64.sqrt()).abs() < 1e-9);
        assert_eq!(peak(&[5, -128, 127]), 128);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10, -10, 30]), 10.0);
    }

    #[test]
    fn test_snr_identical_is_infinite() {
        let a = [1i8, -2, 3, -4];
        assert_eq!(snr_db(&a, &a), Some(f64::INFINITY));
    }

    #[test]
    fn test_snr_known_ratio() {
        // noise power is 1% of signal power
        let reference = [10i8, -10, 10, -10];
        let decoded = [9i8, -9, 9, -9];
        let snr = snr_db(&reference, &decoded).unwrap();
        assert!((snr - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_snr_mismatched_lengths() {
        assert_eq!(snr_db(&[1, 2], &[1]), None);
        assert_eq!(snr_db(&[], &[]), None);
    }

    #[test]
    fn test_settling_index() {
        assert_eq!(settling_index(&[0, 50, 98, 101, 99, 100], 100, 2), Some(2));
        assert_eq!(settling_index(&[100, 100], 100, 0), Some(0));
        assert_eq!(settling_index(&[100, 0], 100, 5), None);
        assert_eq!(settling_index(&[], 0, 0), None);
    }

    #[test]
    fn test_fingerprint() {
        let a = fingerprint(b"tape");
        assert_eq!(a, fingerprint(b"tape"));
        assert_ne!(a, fingerprint(b"tapf"));

        let hex = fingerprint_hex(b"tape");
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
