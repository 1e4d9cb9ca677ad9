use docflow::domain::Tone;

#[test]
fn given_no_choice_when_defaulting_then_tone_is_formal() {
    assert_eq!(Tone::default(), Tone::Formal);
}

#[test]
fn given_mixed_case_name_when_parsing_then_returns_tone() {
    assert_eq!(" Journalistic ".parse::<Tone>(), Ok(Tone::Journalistic));
    assert_eq!("CASUAL".parse::<Tone>(), Ok(Tone::Casual));
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    let result = "sarcastic".parse::<Tone>();
    assert_eq!(result, Err("Invalid tone: sarcastic".to_string()));
}

#[test]
fn given_every_tone_when_round_tripping_name_then_parses_back() {
    for tone in Tone::ALL {
        assert_eq!(tone.as_str().parse::<Tone>(), Ok(tone));
        assert!(!tone.description().is_empty());
    }
    assert_eq!(Tone::ALL.len(), 6);
}
