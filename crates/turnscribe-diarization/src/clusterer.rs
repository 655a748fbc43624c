//! Online speaker clustering by cosine similarity

use tracing::debug;

/// One known speaker within a single processing run
#[derive(Debug, Clone)]
pub struct SpeakerProfile {
    /// Speaker label (e.g. "Speaker_1")
    pub label: String,
    /// Representative embedding, fixed at profile creation
    pub embedding: Vec<f32>,
}

/// Online single-pass speaker clusterer
///
/// Profiles are kept in creation order and labels count up from
/// `Speaker_1`. Each incoming embedding is compared against every
/// representative; a match above the similarity threshold joins that
/// speaker, anything else creates a new one. Assignments are final:
/// there is no re-clustering, and a profile's representative embedding
/// never changes after creation. State is scoped to one run of one
/// audio file.
pub struct SpeakerClusterer {
    profiles: Vec<SpeakerProfile>,
    next_speaker_id: u32,
    similarity_threshold: f32,
}

impl SpeakerClusterer {
    /// Create a new clusterer with the given similarity threshold
    pub fn new(similarity_threshold: f32) -> Self {
        Self {
            profiles: Vec::new(),
            next_speaker_id: 1,
            similarity_threshold,
        }
    }

    /// Assign a speaker label to an embedding
    ///
    /// The maximum is tracked under strict `>`, so among equally similar
    /// profiles the earliest-created one keeps the match. A maximum at
    /// or below the threshold creates a new speaker.
    pub fn assign(&mut self, embedding: &[f32]) -> String {
        if self.profiles.is_empty() {
            return self.create_speaker(embedding);
        }

        let mut best: Option<(usize, f32)> = None;
        for (idx, profile) in self.profiles.iter().enumerate() {
            let similarity = cosine_similarity(embedding, &profile.embedding);
            match best {
                Some((_, max)) if similarity > max => best = Some((idx, similarity)),
                None => best = Some((idx, similarity)),
                _ => {}
            }
        }

        match best {
            Some((idx, max)) if max > self.similarity_threshold => {
                debug!(
                    "Matched existing speaker {} (similarity {:.3})",
                    self.profiles[idx].label, max
                );
                self.profiles[idx].label.clone()
            }
            _ => self.create_speaker(embedding),
        }
    }

    /// Number of distinct speakers seen so far
    pub fn speaker_count(&self) -> usize {
        self.profiles.len()
    }

    /// Known speaker profiles in creation order
    pub fn profiles(&self) -> &[SpeakerProfile] {
        &self.profiles
    }

    fn create_speaker(&mut self, embedding: &[f32]) -> String {
        let label = format!("Speaker_{}", self.next_speaker_id);
        self.next_speaker_id += 1;
        self.profiles.push(SpeakerProfile {
            label: label.clone(),
            embedding: embedding.to_vec(),
        });
        debug!("Created new speaker profile: {}", label);
        label
    }
}

/// Calculate cosine similarity between two vectors
///
/// Defined as 0 when either norm is 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
