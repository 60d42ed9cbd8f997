//! Codec construction from on-disk vocabularies and assembled word lists.

use std::path::Path;

use starhash::codec::{CodecConfig, StarHash};
use starhash::config::StarhashConfig;
use starhash::error::{CodecError, StarhashError, VocabularyError};
use starhash::grid::Healpix;
use starhash::vocabulary::assemble::{self, WordSource};
use starhash::vocabulary::{Vocabulary, VocabularySource};

/// Write `count` distinct synthetic words, one per line.
fn write_words(path: &Path, count: usize) {
    let text: String = (0..count).map(|i| format!("word{i}\n")).collect();
    std::fs::write(path, text).unwrap();
}

#[test]
fn codec_from_vocabulary_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    write_words(&path, 5000);

    let codec = StarHash::new(
        Healpix::new(65_536).unwrap(),
        &VocabularySource::File(path),
        &CodecConfig::default(),
    )
    .unwrap();
    assert_eq!(codec.vocabulary().len(), 5000);

    let name = codec.encode(201.365, -43.019).unwrap();
    assert!(name.split('-').all(|w| w.starts_with("word")));
    let index = codec.decode_index(&name).unwrap();
    assert_eq!(codec.encode_index(index).unwrap(), name);
}

#[test]
fn config_file_selects_vocabulary() {
    let dir = tempfile::TempDir::new().unwrap();
    let words = dir.path().join("words.txt");
    write_words(&words, 4000);

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "nside = 512\nwords = 2\nvocabulary = {:?}\n",
            words.display().to_string()
        ),
    )
    .unwrap();

    let codec = StarhashConfig::discover(Some(&config_path))
        .unwrap()
        .build_codec()
        .unwrap();
    let stats = codec.stats();
    assert_eq!(stats.cells, 12 * 512 * 512);
    assert_eq!(stats.width, 7);
    assert_eq!(stats.vocabulary_size, 4000);

    let name = codec.encode(0.0, 0.0).unwrap();
    assert_eq!(name.split('-').count(), 2);
}

#[test]
fn duplicate_in_file_fails_construction() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "vega\naltair\ndeneb\naltair\n").unwrap();

    let result = StarHash::new(
        Healpix::new(1).unwrap(),
        &VocabularySource::File(path),
        &CodecConfig::default(),
    );
    match result {
        Err(CodecError::Vocabulary(VocabularyError::Duplicate { word, first, line })) => {
            assert_eq!(word, "altair");
            assert_eq!(first, 2);
            assert_eq!(line, 4);
        }
        other => panic!("expected duplicate word, got {other:?}"),
    }
}

#[test]
fn missing_vocabulary_file_surfaces_through_config() {
    let config = StarhashConfig {
        vocabulary: Some("/nonexistent/starhash/words.txt".into()),
        ..Default::default()
    };
    assert!(matches!(
        config.build_codec(),
        Err(StarhashError::Codec(CodecError::Vocabulary(
            VocabularyError::Io { .. }
        )))
    ));
}

#[test]
fn assembled_vocabulary_drives_codec() {
    let dir = tempfile::TempDir::new().unwrap();
    let dice = dir.path().join("dice.txt");
    let plain = dir.path().join("plain.txt");

    let mut dice_text = String::from("# diceware list\n");
    for i in 0..3000 {
        dice_text.push_str(&format!("{i:05}\tdice{i}\n"));
    }
    std::fs::write(&dice, dice_text).unwrap();
    // Overlaps the dice list on dice0..dice999.
    let plain_text: String = (0..1000)
        .map(|i| format!("dice{i}\n"))
        .chain((0..2000).map(|i| format!("plain{i}\n")))
        .collect();
    std::fs::write(&plain, plain_text).unwrap();

    let (words, report) =
        assemble::assemble(&[WordSource::DiceList(dice), WordSource::Plain(plain)]).unwrap();
    assert_eq!(report.words_read, 6000);
    assert_eq!(report.unique_words, 5000);
    assert_eq!(report.lines_skipped, 0);

    let out = dir.path().join("vocabulary.txt");
    assemble::write_vocabulary(&out, &words).unwrap();

    let vocab = Vocabulary::load(&VocabularySource::File(out.clone()), '-').unwrap();
    assert_eq!(vocab.len(), 5000);
    assert!(vocab.words().windows(2).all(|w| w[0] < w[1]));

    let codec = StarHash::new(
        Healpix::new(65_536).unwrap(),
        &VocabularySource::File(out),
        &CodecConfig::default(),
    )
    .unwrap();
    let name = codec.encode(10.684, 41.269).unwrap();
    let index = codec.decode_index(&name).unwrap();
    assert_eq!(codec.encode_index(index).unwrap(), name);
}
