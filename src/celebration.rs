use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;

const SYMBOLS: [char; 5] = ['♥', '♡', '❤', '✦', '*'];
const GRAVITY: f64 = 12.0;
const PARTICLE_COUNT: usize = 40;

/// One glyph flying out of the grade banner
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Particle {
    fn burst<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-7.0..-2.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'♥'),
            color_index: rng.gen_range(0..6),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
        }
    }

    /// Integrate one step; false once the particle has expired
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Short heart burst played over the results screen on an A grade
#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub is_active: bool,
    pub duration: f64,
    started_at: Option<Instant>,
    last_update: Option<Instant>,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            is_active: false,
            duration: 3.0,
            started_at: None,
            last_update: None,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        let center_x = width as f64 / 2.0;
        let center_y = height as f64 / 3.0;

        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::burst(center_x, center_y, &mut rng))
            .collect();
        self.is_active = true;
        let now = Instant::now();
        self.started_at = Some(now);
        self.last_update = Some(now);
    }

    /// Advance the animation using wall-clock time since the previous update
    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }
        let now = Instant::now();
        let dt = self
            .last_update
            .map(|t| now.duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        self.last_update = Some(now);
        self.step(dt);

        let expired = self
            .started_at
            .map(|t| now.duration_since(t).as_secs_f64() >= self.duration)
            .unwrap_or(true);
        if expired {
            self.stop();
        }
    }

    /// Advance by a fixed `dt` seconds
    pub fn step(&mut self, dt: f64) {
        self.particles.retain_mut(|p| p.update(dt));
        if self.particles.is_empty() {
            self.is_active = false;
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
